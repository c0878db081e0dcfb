use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookGenre, BookId, BookPatch, BookTitle, PublishedYear,
};
use kernel::KernelError;

use crate::env_or;
use crate::error::{ConvertError, DriverError};

static MONGODB_URL: &str = "MONGODB_URL";
static MONGODB_DATABASE: &str = "MONGODB_DATABASE";

static DEFAULT_URL: &str = "mongodb://localhost:27017";
static DEFAULT_DATABASE: &str = "book_management";
static BOOK_COLLECTION: &str = "books";

#[derive(Clone)]
pub struct MongoDatabase {
    books: Collection<BookDocument>,
}

impl MongoDatabase {
    /// Builds the client from `MONGODB_URL`/`MONGODB_DATABASE`. The driver
    /// connects lazily, so an unreachable server shows up on the first request.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env_or(MONGODB_URL, DEFAULT_URL).convert_error()?;
        let database = env_or(MONGODB_DATABASE, DEFAULT_DATABASE).convert_error()?;
        let client = Client::with_uri_str(&url)
            .await
            .map_err(DriverError::from)
            .convert_error()?;
        tracing::info!("Using MongoDB database `{database}`, collection `{BOOK_COLLECTION}`");
        let books = client.database(&database).collection(BOOK_COLLECTION);
        Ok(Self { books })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MongoDatabase {
    type Connection = Collection<BookDocument>;
    async fn acquire(&self) -> error_stack::Result<Collection<BookDocument>, KernelError> {
        Ok(self.books.clone())
    }
}

impl DependOnBookQuery for MongoDatabase {
    type BookQuery = MongoBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MongoBookRepository
    }
}

impl DependOnBookModifier for MongoDatabase {
    type BookModifier = MongoBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MongoBookRepository
    }
}

pub struct MongoBookRepository;

#[async_trait::async_trait]
impl BookQuery for MongoBookRepository {
    type Connection = Collection<BookDocument>;

    async fn find_all(
        &self,
        con: &mut Collection<BookDocument>,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        MongoBookInternal::find_all(con).await.convert_error()
    }

    async fn find_by_id(
        &self,
        con: &mut Collection<BookDocument>,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        MongoBookInternal::find_by_id(con, id).await.convert_error()
    }
}

#[async_trait::async_trait]
impl BookModifier for MongoBookRepository {
    type Connection = Collection<BookDocument>;

    async fn insert(
        &self,
        con: &mut Collection<BookDocument>,
        book: &BookDraft,
    ) -> error_stack::Result<BookId, KernelError> {
        MongoBookInternal::insert(con, book).await.convert_error()
    }

    async fn update_by_id(
        &self,
        con: &mut Collection<BookDocument>,
        id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<bool, KernelError> {
        MongoBookInternal::update_by_id(con, id, patch)
            .await
            .convert_error()
    }

    async fn delete_by_id(
        &self,
        con: &mut Collection<BookDocument>,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        MongoBookInternal::delete_by_id(con, id).await.convert_error()
    }
}

/// Stored shape of a book. Optional fields are omitted rather than written as `null`.
///
/// Text fields may hold any BSON type; non-string values are rendered as
/// relaxed extended JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    title: Bson,
    #[serde(default)]
    author: Bson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    published_year: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    genre: Option<Bson>,
}

impl From<BookDocument> for Book {
    fn from(value: BookDocument) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(render(value.title)),
            BookAuthor::new(render(value.author)),
            value
                .published_year
                .map(|year| PublishedYear::new(year.into_relaxed_extjson())),
            value
                .genre
                .filter(|genre| genre != &Bson::Null)
                .map(|genre| BookGenre::new(render(genre))),
        )
    }
}

fn render(value: Bson) -> String {
    match value {
        Bson::String(text) => text,
        Bson::Null => String::new(),
        other => other.into_relaxed_extjson().to_string(),
    }
}

// Written without `_id` so the store assigns the key.
#[derive(Debug, Serialize)]
struct NewBookDocument {
    title: String,
    author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_year: Option<Bson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<String>,
}

impl TryFrom<&BookDraft> for NewBookDocument {
    type Error = DriverError;
    fn try_from(value: &BookDraft) -> Result<Self, Self::Error> {
        let published_year = value
            .published_year()
            .as_ref()
            .map(|year| bson::to_bson(year.as_ref()))
            .transpose()?;
        Ok(Self {
            title: String::from(value.title().clone()),
            author: String::from(value.author().clone()),
            published_year,
            genre: value.genre().clone().map(String::from),
        })
    }
}

fn by_id(id: &BookId) -> Document {
    doc! { "_id": ObjectId::from(*id) }
}

fn set_fields(patch: &BookPatch) -> Result<Document, DriverError> {
    let mut set = Document::new();
    if let Some(title) = patch.title() {
        set.insert("title", String::from(title.clone()));
    }
    if let Some(author) = patch.author() {
        set.insert("author", String::from(author.clone()));
    }
    if let Some(published_year) = patch.published_year() {
        set.insert("published_year", bson::to_bson(published_year.as_ref())?);
    }
    if let Some(genre) = patch.genre() {
        set.insert("genre", String::from(genre.clone()));
    }
    Ok(set)
}

pub(in crate::database) struct MongoBookInternal;

impl MongoBookInternal {
    // Natural order of the collection; no sort is requested.
    #[tracing::instrument(skip_all)]
    async fn find_all(con: &Collection<BookDocument>) -> Result<Vec<Book>, DriverError> {
        let mut cursor = con.find(None, None).await?;
        let mut books = Vec::new();
        while cursor.advance().await? {
            match cursor.deserialize_current() {
                Ok(document) => books.push(Book::from(document)),
                Err(error) => tracing::warn!("Skipping unreadable book document: {error}"),
            }
        }
        tracing::debug!("Loaded {} books", books.len());
        Ok(books)
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_id(
        con: &Collection<BookDocument>,
        id: &BookId,
    ) -> Result<Option<Book>, DriverError> {
        let found = con.find_one(by_id(id), None).await?;
        Ok(found.map(Book::from))
    }

    #[tracing::instrument(skip(con))]
    async fn insert(con: &Collection<BookDocument>, book: &BookDraft) -> Result<BookId, DriverError> {
        let document = NewBookDocument::try_from(book)?;
        let result = con
            .clone_with_type::<NewBookDocument>()
            .insert_one(document, None)
            .await?;
        match result.inserted_id {
            Bson::ObjectId(id) => Ok(BookId::new(id)),
            other => Err(DriverError::UnexpectedKey(other)),
        }
    }

    #[tracing::instrument(skip(con))]
    async fn update_by_id(
        con: &Collection<BookDocument>,
        id: &BookId,
        patch: &BookPatch,
    ) -> Result<bool, DriverError> {
        let update = doc! { "$set": set_fields(patch)? };
        let result = con.update_one(by_id(id), update, None).await?;
        Ok(result.matched_count > 0)
    }

    #[tracing::instrument(skip(con))]
    async fn delete_by_id(con: &Collection<BookDocument>, id: &BookId) -> Result<bool, DriverError> {
        let result = con.delete_one(by_id(id), None).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod test {
    use mongodb::bson::{self, doc};
    use serde_json::json;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookFields, BookGenre, BookPatch, BookTitle, PublishedYear,
    };

    use crate::database::mongo::{BookDocument, MongoBookRepository, MongoDatabase};

    #[test]
    fn documents_with_loosely_typed_fields_are_readable() {
        let document = doc! {
            "_id": bson::oid::ObjectId::new(),
            "title": 1984,
            "author": "Orwell",
            "published_year": "1949",
            "genre": ["Dystopia"],
        };
        let book = Book::from(bson::from_document::<BookDocument>(document).unwrap());
        assert_eq!(book.title(), &BookTitle::new("1984"));
        assert_eq!(book.author(), &BookAuthor::new("Orwell"));
        assert_eq!(book.published_year(), &Some(PublishedYear::new(json!("1949"))));
        assert_eq!(book.genre(), &Some(BookGenre::new("[\"Dystopia\"]")));

        let document = doc! { "_id": bson::oid::ObjectId::new(), "genre": null };
        let book = Book::from(bson::from_document::<BookDocument>(document).unwrap());
        assert_eq!(book.title(), &BookTitle::new(""));
        assert!(book.genre().is_none());
    }

    #[test_with::env(MONGODB_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), kernel::KernelError> {
        let db = MongoDatabase::new().await?;
        let mut con = db.acquire().await?;

        let draft = BookFields {
            title: Some(json!("Dune")),
            author: Some(json!("Herbert")),
            published_year: Some(json!(1965)),
            genre: None,
        }
        .validate_for_create()?;
        let id = MongoBookRepository.insert(&mut con, &draft).await?;

        let found = MongoBookRepository.find_by_id(&mut con, &id).await?;
        let found = found.expect("inserted book should be readable");
        assert_eq!(found.title(), draft.title());
        assert_eq!(found.published_year(), draft.published_year());
        assert!(found.genre().is_none());

        let all = MongoBookRepository.find_all(&mut con).await?;
        assert!(all.iter().any(|book| book.id() == &id));

        let patch = BookPatch::new(None, None, None, Some(BookGenre::new("SciFi")));
        assert!(MongoBookRepository.update_by_id(&mut con, &id, &patch).await?);
        let found = MongoBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found.map(|book| book.genre().clone()), Some(Some(BookGenre::new("SciFi"))));

        assert!(MongoBookRepository.delete_by_id(&mut con, &id).await?);
        assert!(!MongoBookRepository.delete_by_id(&mut con, &id).await?);
        assert!(!MongoBookRepository.update_by_id(&mut con, &id, &patch).await?);
        assert!(MongoBookRepository.find_by_id(&mut con, &id).await?.is_none());

        Ok(())
    }
}
