use error_stack::Report;
use serde_json::Value;

use crate::entity::{BookAuthor, BookDraft, BookGenre, BookPatch, BookTitle, PublishedYear};
use crate::{KernelError, ValidationFailure};

/// The four recognized fields of a decoded request body, exactly as sent.
///
/// Anything else the client put in the body is dropped before this point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFields {
    pub title: Option<Value>,
    pub author: Option<Value>,
    pub published_year: Option<Value>,
    pub genre: Option<Value>,
}

impl BookFields {
    /// `title` and `author` must be non-empty strings. Optional fields that
    /// are absent or `null` are left out of the draft entirely.
    pub fn validate_for_create(self) -> error_stack::Result<BookDraft, KernelError> {
        let (Some(title), Some(author)) = (truthy(self.title), truthy(self.author)) else {
            return Err(invalid(ValidationFailure::MissingRequiredFields));
        };
        let title = text(title, "title")?;
        let author = text(author, "author")?;
        let published_year = self
            .published_year
            .filter(|year| !year.is_null())
            .map(year)
            .transpose()?;
        let genre = self
            .genre
            .filter(|genre| !genre.is_null())
            .map(|genre| text(genre, "genre"))
            .transpose()?
            .map(BookGenre::new);

        Ok(BookDraft::new(
            BookTitle::new(title),
            BookAuthor::new(author),
            published_year,
            genre,
        ))
    }

    /// Keeps only the fields that are present and truthy. Empty strings,
    /// zero, `false` and `null` count as "not sent".
    pub fn validate_for_update(self) -> error_stack::Result<BookPatch, KernelError> {
        let title = truthy(self.title)
            .map(|title| text(title, "title"))
            .transpose()?
            .map(BookTitle::new);
        let author = truthy(self.author)
            .map(|author| text(author, "author"))
            .transpose()?
            .map(BookAuthor::new);
        let published_year = truthy(self.published_year).map(year).transpose()?;
        let genre = truthy(self.genre)
            .map(|genre| text(genre, "genre"))
            .transpose()?
            .map(BookGenre::new);

        let patch = BookPatch::new(title, author, published_year, genre);
        if patch.is_empty() {
            return Err(invalid(ValidationFailure::NoFieldsToUpdate));
        }
        Ok(patch)
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn truthy(value: Option<Value>) -> Option<Value> {
    value.filter(is_truthy)
}

fn text(value: Value, field: &'static str) -> error_stack::Result<String, KernelError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(invalid(ValidationFailure::InvalidFieldType(field))
            .attach_printable(format!("{field} was {other}"))),
    }
}

// Kept as sent, except integers beyond the signed 64-bit range.
fn year(value: Value) -> error_stack::Result<PublishedYear, KernelError> {
    if !fits_signed_range(&value) {
        return Err(invalid(ValidationFailure::InvalidFieldType("published_year"))
            .attach_printable(format!("published_year was {value}")));
    }
    Ok(PublishedYear::new(value))
}

fn fits_signed_range(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.is_f64() || number.is_i64(),
        Value::Array(items) => items.iter().all(fits_signed_range),
        Value::Object(map) => map.values().all(fits_signed_range),
        _ => true,
    }
}

fn invalid(failure: ValidationFailure) -> Report<KernelError> {
    Report::new(KernelError::Validation(failure))
}
