use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use error_stack::Report;
use kernel::prelude::entity::{BookFields, BookId};
use kernel::KernelError;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::controller::TryIntake;

// Bodies are taken as plain JSON objects so that a wrong field type is a
// validation failure rather than a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct CreateBookRequest(Map<String, Value>);

#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct UpdateBookRequest(Map<String, Value>);

#[derive(Debug)]
pub struct GetBookRequest {
    id: String,
}

impl GetBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: String,
}

impl DeleteBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

fn recognized_fields(mut body: Map<String, Value>) -> BookFields {
    BookFields {
        title: body.remove("title"),
        author: body.remove("author"),
        published_year: body.remove("published_year"),
        genre: body.remove("genre"),
    }
}

pub struct BookTransformer;

impl TryIntake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateBookRequest) -> Result<Self::To, Self::Error> {
        let book = recognized_fields(input.0).validate_for_create()?;
        Ok(CreateBookDto { book })
    }
}

impl TryIntake<(String, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: (String, UpdateBookRequest)) -> Result<Self::To, Self::Error> {
        let (id, input) = input;
        let patch = recognized_fields(input.0).validate_for_update()?;
        let id = BookId::parse(&id)?;
        Ok(UpdateBookDto { id, patch })
    }
}

impl TryIntake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: GetBookRequest) -> Result<Self::To, Self::Error> {
        Ok(GetBookDto {
            id: BookId::parse(&input.id)?,
        })
    }
}

impl TryIntake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: DeleteBookRequest) -> Result<Self::To, Self::Error> {
        Ok(DeleteBookDto {
            id: BookId::parse(&input.id)?,
        })
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use kernel::{KernelError, ValidationFailure};

    use super::*;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let fields = recognized_fields(body(json!({
            "title": "Dune",
            "author": "Herbert",
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "rating": 5
        })));
        assert_eq!(fields.title, Some(json!("Dune")));
        assert_eq!(fields.author, Some(json!("Herbert")));
        assert_eq!(fields.published_year, None);
        assert_eq!(fields.genre, None);
    }

    #[test]
    fn update_validates_body_before_id() {
        let result = BookTransformer.emit((
            "not-an-id".to_string(),
            UpdateBookRequest::default(),
        ));
        let report = result.err().expect("empty update must be rejected");
        assert_eq!(
            report.current_context(),
            &KernelError::Validation(ValidationFailure::NoFieldsToUpdate)
        );

        let result = BookTransformer.emit((
            "not-an-id".to_string(),
            UpdateBookRequest(body(json!({ "genre": "SciFi" }))),
        ));
        let report = result.err().expect("malformed id must be rejected");
        assert_eq!(report.current_context(), &KernelError::InvalidIdentifier);
    }
}
