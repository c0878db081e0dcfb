use serde::Deserialize;
use serde_json::{Map, Value};

static NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub published_year: Option<Value>,
    #[serde(default)]
    pub genre: Option<Value>,
}

impl Book {
    pub fn published_year_label(&self) -> String {
        label(self.published_year.as_ref())
    }

    pub fn genre_label(&self) -> String {
        label(self.genre.as_ref())
    }

    /// Current values as editable text, used to pre-fill the update form.
    pub fn to_form(&self) -> BookForm {
        BookForm {
            title: self.title.clone(),
            author: self.author.clone(),
            published_year: text(self.published_year.as_ref()),
            genre: text(self.genre.as_ref()),
        }
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn label(value: Option<&Value>) -> String {
    let text = text(value);
    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text
    }
}

/// What the user typed into the add/update screens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub published_year: String,
    pub genre: String,
}

impl BookForm {
    pub fn has_required_fields(&self) -> bool {
        !self.title.trim().is_empty() && !self.author.trim().is_empty()
    }

    /// Request body with blank fields left out.
    pub fn to_body(&self) -> Map<String, Value> {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("published_year", &self.published_year),
            ("genre", &self.genre),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (key.to_string(), Value::String(value.trim().to_string())))
        .collect()
    }
}
