use vodca::References;

use crate::entity::{BookAuthor, BookGenre, BookTitle, PublishedYear};

/// A partial update. `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq, References)]
pub struct BookPatch {
    title: Option<BookTitle>,
    author: Option<BookAuthor>,
    published_year: Option<PublishedYear>,
    genre: Option<BookGenre>,
}

impl BookPatch {
    pub fn new(
        title: Option<BookTitle>,
        author: Option<BookAuthor>,
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

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.published_year.is_none()
            && self.genre.is_none()
    }
}
