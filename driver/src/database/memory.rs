use std::collections::BTreeMap;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookDraft, BookId, BookPatch};
use kernel::KernelError;

pub type InMemoryCollection = Arc<RwLock<BTreeMap<BookId, Book>>>;

/// Process-local book collection.
///
/// Keys are freshly generated `ObjectId`s, so iterating the map yields books
/// in ascending `ObjectId` order, usually insertion order. The counter part of
/// an `ObjectId` starts at a random value and wraps, so two books created in
/// the same second may come out swapped. Each operation takes the lock once; there is no cross
/// operation locking.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    books: InMemoryCollection,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Connection = InMemoryCollection;
    async fn acquire(&self) -> error_stack::Result<InMemoryCollection, KernelError> {
        Ok(Arc::clone(&self.books))
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Connection = InMemoryCollection;

    async fn find_all(
        &self,
        con: &mut InMemoryCollection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.read().await.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryCollection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.read().await.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Connection = InMemoryCollection;

    #[tracing::instrument(skip(self, con))]
    async fn insert(
        &self,
        con: &mut InMemoryCollection,
        book: &BookDraft,
    ) -> error_stack::Result<BookId, KernelError> {
        let id = BookId::new(ObjectId::new());
        con.write()
            .await
            .insert(id, Book::from_draft(id, book.clone()));
        Ok(id)
    }

    #[tracing::instrument(skip(self, con))]
    async fn update_by_id(
        &self,
        con: &mut InMemoryCollection,
        id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<bool, KernelError> {
        let mut books = con.write().await;
        let Some(book) = books.get_mut(id) else {
            return Ok(false);
        };
        book.apply(patch);
        Ok(true)
    }

    #[tracing::instrument(skip(self, con))]
    async fn delete_by_id(
        &self,
        con: &mut InMemoryCollection,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con.write().await.remove(id).is_some())
    }
}
