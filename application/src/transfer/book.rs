use serde_json::Value;

use kernel::prelude::entity::{Book, BookDraft, BookId, BookPatch, DestructBook};

/// Read model handed to presenters. The id is already in its external form.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published_year: Option<Value>,
    pub genre: Option<String>,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            published_year,
            genre,
        } = value.into_destruct();
        Self {
            id: id.to_string(),
            title: title.into(),
            author: author.into(),
            published_year: published_year.map(Into::into),
            genre: genre.map(Into::into),
        }
    }
}

pub struct GetBookDto {
    pub id: BookId,
}

pub struct CreateBookDto {
    pub book: BookDraft,
}

pub struct UpdateBookDto {
    pub id: BookId,
    pub patch: BookPatch,
}

pub struct DeleteBookDto {
    pub id: BookId,
}

#[derive(Debug)]
pub struct CreatedBookDto {
    pub id: BookId,
}

#[derive(Debug)]
pub struct UpdatedBookDto {
    pub id: BookId,
}

#[derive(Debug)]
pub struct DeletedBookDto {
    pub id: BookId,
}
