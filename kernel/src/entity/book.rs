mod author;
mod fields;
mod genre;
mod id;
mod patch;
mod published_year;
mod title;

pub use self::{author::*, fields::*, genre::*, id::*, patch::*, published_year::*, title::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    published_year: Option<PublishedYear>,
    genre: Option<BookGenre>,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        published_year: Option<PublishedYear>,
        genre: Option<BookGenre>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            published_year,
            genre,
        }
    }

    /// Attaches the store-assigned id to a validated draft.
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        let DestructBookDraft {
            title,
            author,
            published_year,
            genre,
        } = draft.into_destruct();
        Self::new(id, title, author, published_year, genre)
    }

    /// Overwrites only the fields carried by `patch`. The id never changes.
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(title) = patch.title() {
            self.title = title.clone();
        }
        if let Some(author) = patch.author() {
            self.author = author.clone();
        }
        if let Some(published_year) = patch.published_year() {
            self.published_year = Some(published_year.clone());
        }
        if let Some(genre) = patch.genre() {
            self.genre = Some(genre.clone());
        }
    }
}

/// A validated book that has not been persisted yet, so it carries no id.
#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct BookDraft {
    title: BookTitle,
    author: BookAuthor,
    published_year: Option<PublishedYear>,
    genre: Option<BookGenre>,
}

impl BookDraft {
    pub fn new(
        title: BookTitle,
        author: BookAuthor,
        published_year: Option<PublishedYear>,
        genre: Option<BookGenre>,
    ) -> Self {
        Self {
            title,
            author,
            published_year,
            genre,
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn apply_touches_only_patched_fields() {
        let id = BookId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let mut book = Book::new(
            id,
            BookTitle::new("Dune"),
            BookAuthor::new("Herbert"),
            Some(PublishedYear::new(json!(1965))),
            None,
        );
        let patch = BookPatch::new(None, None, None, Some(BookGenre::new("SciFi")));
        book.apply(&patch);

        assert_eq!(book.id(), &id);
        assert_eq!(book.title(), &BookTitle::new("Dune"));
        assert_eq!(book.author(), &BookAuthor::new("Herbert"));
        assert_eq!(book.published_year(), &Some(PublishedYear::new(json!(1965))));
        assert_eq!(book.genre(), &Some(BookGenre::new("SciFi")));
    }

    #[test]
    fn draft_keeps_its_fields() {
        let draft = BookDraft::new(
            BookTitle::new("Dune"),
            BookAuthor::new("Herbert"),
            None,
            None,
        );
        let id = BookId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let book = Book::from_draft(id, draft);
        assert_eq!(book.title(), &BookTitle::new("Dune"));
        assert!(book.genre().is_none());
        assert!(book.published_year().is_none());
    }
}
