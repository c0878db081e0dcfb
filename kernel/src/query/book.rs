use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Book, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Connection: 'static + Send;
    /// Every book in the collection, in whatever order the store yields them.
    async fn find_all(
        &self,
        con: &mut Self::Connection,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Connection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
