use crate::KernelError;

/// Hands out connection handles to the backing document store.
///
/// A handle lives for a single request; nothing is shared between requests
/// except whatever pooling the store driver does on its own.
#[async_trait::async_trait]
pub trait DatabaseConnection: 'static + Sync + Send {
    type Connection: 'static + Send;
    async fn acquire(&self) -> error_stack::Result<Self::Connection, KernelError>;
}

pub trait DependOnDatabaseConnection: 'static + Sync + Send {
    type DatabaseConnection: DatabaseConnection;
    fn database_connection(&self) -> &Self::DatabaseConnection;
}

impl<T> DependOnDatabaseConnection for T
where
    T: DatabaseConnection,
{
    type DatabaseConnection = T;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self
    }
}
