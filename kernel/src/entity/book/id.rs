use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bson::oid::ObjectId;
use error_stack::Report;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Store-native key of a book.
///
/// Externally a book id is the 24 character hex rendering of a 12 byte
/// `ObjectId`. [`BookId::parse`] is the only way an external string becomes
/// a key, and [`Display`] is the only way a key becomes a string again.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Fromln, AsRefln)]
pub struct BookId(ObjectId);

impl BookId {
    pub fn new(id: impl Into<ObjectId>) -> Self {
        Self(id.into())
    }

    pub fn parse(id: &str) -> error_stack::Result<Self, KernelError> {
        ObjectId::parse_str(id).map(Self).map_err(|error| {
            Report::new(error)
                .change_context(KernelError::InvalidIdentifier)
                .attach_printable(format!("Malformed book id: {id:?}"))
        })
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl FromStr for BookId {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ObjectId::parse_str(&raw)
            .map(Self)
            .map_err(|_| de::Error::custom(format!("invalid book id: {raw:?}")))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_and_format_round_trip() {
        let id = BookId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn format_is_lowercase() {
        let id = BookId::parse("65A1F0C2E4B0A1B2C3D4E5F6").unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in [
            "",
            "123",
            "65a1f0c2e4b0a1b2c3d4e5f",
            "65a1f0c2e4b0a1b2c3d4e5f6a",
            "zza1f0c2e4b0a1b2c3d4e5f6",
            "not-an-object-id-at-all!",
        ] {
            let report = BookId::parse(raw).unwrap_err();
            assert_eq!(report.current_context(), &KernelError::InvalidIdentifier);
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = BookId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!("65a1f0c2e4b0a1b2c3d4e5f6"));
        let back: BookId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }
}
