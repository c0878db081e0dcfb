use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{BookDraft, BookId, BookPatch};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Connection: 'static + Send;
    /// Persists the draft and returns the id the store assigned to it.
    async fn insert(
        &self,
        con: &mut Self::Connection,
        book: &BookDraft,
    ) -> error_stack::Result<BookId, KernelError>;
    /// Returns `false` when no book matched `id`.
    async fn update_by_id(
        &self,
        con: &mut Self::Connection,
        id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<bool, KernelError>;
    /// Returns `false` when no book matched `id`.
    async fn delete_by_id(
        &self,
        con: &mut Self::Connection,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
