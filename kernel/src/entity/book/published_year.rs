use serde_json::Value;
use vodca::{AsRefln, Fromln};

// Kept as the raw JSON value the client sent; no coercion to a number.
#[derive(Debug, Clone, PartialEq, Fromln, AsRefln)]
pub struct PublishedYear(Value);

impl PublishedYear {
    pub fn new(year: impl Into<Value>) -> Self {
        Self(year.into())
    }
}
