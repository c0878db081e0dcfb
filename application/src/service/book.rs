use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::KernelError;

use crate::transfer::{
    BookDto, CreateBookDto, CreatedBookDto, DeleteBookDto, DeletedBookDto, GetBookDto,
    UpdateBookDto, UpdatedBookDto,
};

#[async_trait::async_trait]
pub trait GetBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery
{
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let book = self
            .book_query()
            .find_by_id(&mut connection, &dto.id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("No book with id {}", dto.id))
            })?;

        Ok(BookDto::from(book))
    }

    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let books = self.book_query().find_all(&mut connection).await?;

        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn create_book(
        &self,
        dto: CreateBookDto,
    ) -> error_stack::Result<CreatedBookDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let id = self
            .book_modifier()
            .insert(&mut connection, &dto.book)
            .await?;
        tracing::info!("Created book {id}");

        Ok(CreatedBookDto { id })
    }
}

impl<T> CreateBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn update_book(
        &self,
        dto: UpdateBookDto,
    ) -> error_stack::Result<UpdatedBookDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let UpdateBookDto { id, patch } = dto;
        let matched = self
            .book_modifier()
            .update_by_id(&mut connection, &id, &patch)
            .await?;
        if !matched {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with id {id} to update")));
        }
        tracing::info!("Updated book {id}");

        Ok(UpdatedBookDto { id })
    }
}

impl<T> UpdateBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn delete_book(
        &self,
        dto: DeleteBookDto,
    ) -> error_stack::Result<DeletedBookDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let id = dto.id;
        let existed = self
            .book_modifier()
            .delete_by_id(&mut connection, &id)
            .await?;
        if !existed {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with id {id} to delete")));
        }
        tracing::info!("Deleted book {id}");

        Ok(DeletedBookDto { id })
    }
}

impl<T> DeleteBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[cfg(test)]
mod test {
    use serde_json::json;

    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::{BookFields, BookId};
    use kernel::KernelError;

    use crate::service::{CreateBookService, DeleteBookService, GetBookService, UpdateBookService};
    use crate::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

    fn dune() -> CreateBookDto {
        let book = BookFields {
            title: Some(json!("Dune")),
            author: Some(json!("Herbert")),
            published_year: Some(json!(1965)),
            genre: None,
        }
        .validate_for_create()
        .unwrap();
        CreateBookDto { book }
    }

    fn unknown_id() -> BookId {
        BookId::parse("000000000000000000000000").unwrap()
    }

    #[tokio::test]
    async fn created_book_can_be_read_back() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let created = db.create_book(dune()).await?;

        let book = db.get_book(GetBookDto { id: created.id }).await?;
        assert_eq!(book.id, created.id.to_string());
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
        assert_eq!(book.published_year, Some(json!(1965)));
        assert_eq!(book.genre, None);
        Ok(())
    }

    #[tokio::test]
    async fn list_contains_every_created_book() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut created = Vec::new();
        for _ in 0..3 {
            created.push(db.create_book(dune()).await?.id.to_string());
        }

        let mut listed = db
            .get_all_books()
            .await?
            .into_iter()
            .map(|book| book.id)
            .collect::<Vec<_>>();
        listed.sort();
        created.sort();
        assert_eq!(listed, created);
        Ok(())
    }

    #[tokio::test]
    async fn missing_books_are_not_found() {
        let db = InMemoryDatabase::new();
        let patch = BookFields {
            genre: Some(json!("SciFi")),
            ..Default::default()
        }
        .validate_for_update()
        .unwrap();

        let get = db.get_book(GetBookDto { id: unknown_id() }).await;
        let update = db
            .update_book(UpdateBookDto {
                id: unknown_id(),
                patch,
            })
            .await;
        let delete = db.delete_book(DeleteBookDto { id: unknown_id() }).await;

        assert_eq!(get.unwrap_err().current_context(), &KernelError::NotFound);
        assert_eq!(update.unwrap_err().current_context(), &KernelError::NotFound);
        assert_eq!(delete.unwrap_err().current_context(), &KernelError::NotFound);
    }

    #[tokio::test]
    async fn delete_is_reported_once() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let id = db.create_book(dune()).await?.id;

        db.delete_book(DeleteBookDto { id }).await?;
        let again = db.delete_book(DeleteBookDto { id }).await;
        assert_eq!(again.unwrap_err().current_context(), &KernelError::NotFound);
        Ok(())
    }
}
