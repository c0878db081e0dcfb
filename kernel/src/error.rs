use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Validation(ValidationFailure),
    InvalidIdentifier,
    NotFound,
    StoreUnavailable,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation(failure) => write!(f, "{failure}"),
            KernelError::InvalidIdentifier => write!(f, "Invalid book id"),
            KernelError::NotFound => write!(f, "Book not found"),
            KernelError::StoreUnavailable => write!(f, "Document store unavailable"),
            KernelError::Internal => write!(f, "Internal server error"),
        }
    }
}

impl Context for KernelError {}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ValidationFailure {
    MissingRequiredFields,
    NoFieldsToUpdate,
    InvalidFieldType(&'static str),
    MalformedBody,
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::MissingRequiredFields => {
                write!(f, "Missing required fields: 'title' and 'author'")
            }
            ValidationFailure::NoFieldsToUpdate => write!(f, "No fields to update"),
            ValidationFailure::InvalidFieldType(field) => {
                write!(f, "Field '{field}' has an invalid type")
            }
            ValidationFailure::MalformedBody => write!(f, "Request body must be a JSON object"),
        }
    }
}

impl From<ValidationFailure> for KernelError {
    fn from(value: ValidationFailure) -> Self {
        Self::Validation(value)
    }
}
