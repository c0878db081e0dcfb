use application::service::{
    CreateBookService, DeleteBookService, GetBookService, UpdateBookService,
};
use std::ops::Deref;
use std::sync::Arc;

/// Everything a store needs to back the book routes.
pub trait BookModule:
    GetBookService + CreateBookService + UpdateBookService + DeleteBookService
{
}

impl<T> BookModule for T where
    T: GetBookService + CreateBookService + UpdateBookService + DeleteBookService
{
}

pub struct AppModule<Db>(Arc<Handler<Db>>);

impl<Db> AppModule<Db> {
    pub fn new(database: Db) -> Self {
        Self(Arc::new(Handler::new(database)))
    }
}

impl<Db> Clone for AppModule<Db> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<Db> Deref for AppModule<Db> {
    type Target = Handler<Db>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<Db> {
    database: Db,
}

impl<Db> Handler<Db> {
    pub fn new(database: Db) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &Db {
        &self.database
    }
}
