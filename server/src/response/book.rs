use application::transfer::{BookDto, CreatedBookDto, DeletedBookDto, UpdatedBookDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CreatedBookResponse {
    message: &'static str,
    book_id: String,
}

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_year: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<String>,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        let BookDto {
            id,
            title,
            author,
            published_year,
            genre,
        } = value;
        Self {
            id,
            title,
            author,
            published_year,
            genre,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<CreatedBookDto> for BookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, input: CreatedBookDto) -> Self::To {
        CreatedBookResponse {
            message: "Book added successfully",
            book_id: input.id.to_string(),
        }
    }
}

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        Json::from(result)
    }
}

impl Exhaust<UpdatedBookDto> for BookPresenter {
    type To = MessageResponse;
    fn emit(&self, _: UpdatedBookDto) -> Self::To {
        MessageResponse {
            message: "Book updated successfully",
        }
    }
}

impl Exhaust<DeletedBookDto> for BookPresenter {
    type To = MessageResponse;
    fn emit(&self, _: DeletedBookDto) -> Self::To {
        MessageResponse {
            message: "Book deleted successfully",
        }
    }
}
