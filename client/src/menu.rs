use console::{style, Term};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::api::BookApi;
use crate::book::BookForm;
use crate::error::ClientError;

static OPTIONS: [&str; 5] = ["View Books", "Add Book", "Update Book", "Delete Book", "Quit"];

/// Interactive terminal front end. Holds nothing between screens except the
/// API handle and the input stream.
pub struct Menu<R = BufReader<Stdin>> {
    api: BookApi,
    term: Term,
    input: Lines<R>,
}

impl Menu {
    pub fn new(api: BookApi) -> Self {
        Self::with_input(api, BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Menu<R> {
    pub fn with_input(api: BookApi, input: R) -> Self {
        Self {
            api,
            term: Term::stdout(),
            input: input.lines(),
        }
    }

    pub async fn run(&mut self) -> Result<(), ClientError> {
        self.term
            .write_line(&style("Book Management System").bold().to_string())?;
        loop {
            self.term.write_line("")?;
            for (index, option) in OPTIONS.iter().enumerate() {
                self.term.write_line(&format!("  {}) {option}", index + 1))?;
            }
            let Some(choice) = self.prompt("Select an option").await? else {
                return Ok(());
            };
            let outcome = match choice.as_str() {
                "1" => self.view_books().await,
                "2" => self.add_book().await,
                "3" => self.update_book().await,
                "4" => self.delete_book().await,
                "5" | "q" => return Ok(()),
                _ => self.error("Unknown option"),
            };
            if let Err(error) = outcome {
                match error {
                    ClientError::Io(_) => return Err(error),
                    other => self.error(&format!("Request failed: {other}"))?,
                }
            }
        }
    }

    async fn view_books(&mut self) -> Result<(), ClientError> {
        self.heading("View All Books")?;
        let books = match self.api.list_books().await {
            Ok(books) => books,
            Err(ClientError::Api { status, .. }) => {
                tracing::debug!("Listing books failed with status {status}");
                return self.error("Failed to fetch books.");
            }
            Err(error) => return Err(error),
        };
        for book in books {
            self.term.write_line(&format!("{} {}", style("ID:").bold(), book.id))?;
            self.term.write_line(&format!("{} {}", style("Title:").bold(), book.title))?;
            self.term.write_line(&format!("{} {}", style("Author:").bold(), book.author))?;
            self.term.write_line(&format!(
                "{} {}",
                style("Published Year:").bold(),
                book.published_year_label()
            ))?;
            self.term.write_line(&format!("{} {}", style("Genre:").bold(), book.genre_label()))?;
            self.term.write_line("---")?;
        }
        Ok(())
    }

    async fn add_book(&mut self) -> Result<(), ClientError> {
        self.heading("Add New Book")?;
        let form = BookForm {
            title: self.prompt("Book Title").await?.unwrap_or_default(),
            author: self.prompt("Author").await?.unwrap_or_default(),
            published_year: self.prompt("Published Year").await?.unwrap_or_default(),
            genre: self.prompt("Genre").await?.unwrap_or_default(),
        };
        if !form.has_required_fields() {
            return self.error("Title and Author are required fields.");
        }
        match self.api.add_book(&form).await {
            Ok(id) => self.success(&format!("Book added successfully! (id {id})")),
            Err(ClientError::Api { message, .. }) => {
                self.error(&format!("Failed to add book: {message}"))
            }
            Err(error) => Err(error),
        }
    }

    async fn update_book(&mut self) -> Result<(), ClientError> {
        self.heading("Update Book Details")?;
        let id = self.prompt("Enter Book ID to Update").await?.unwrap_or_default();
        if id.is_empty() {
            return self.error("Please enter a Book ID to update.");
        }
        let current = match self.api.get_book(&id).await {
            Ok(book) => book.to_form(),
            Err(ClientError::Io(error)) => return Err(ClientError::Io(error)),
            Err(_) => return self.error("Book not found!"),
        };

        self.term
            .write_line("Press Enter to keep a value, or type `-` to leave it out of the update.")?;
        let form = BookForm {
            title: self.edit("New Book Title", &current.title).await?,
            author: self.edit("New Book Author", &current.author).await?,
            published_year: self.edit("New Published Year", &current.published_year).await?,
            genre: self.edit("New Genre", &current.genre).await?,
        };
        if form.to_body().is_empty() {
            return self.error("Please fill in at least one field to update.");
        }
        match self.api.update_book(&id, &form).await {
            Ok(_) => self.success("Book updated successfully!"),
            Err(ClientError::Api { message, .. }) => self.error(&format!("Error: {message}")),
            Err(error) => Err(error),
        }
    }

    async fn delete_book(&mut self) -> Result<(), ClientError> {
        self.heading("Delete Book")?;
        let id = self.prompt("Enter Book ID to Delete").await?.unwrap_or_default();
        if id.is_empty() {
            return self.error("Please enter a Book ID to delete.");
        }
        match self.api.delete_book(&id).await {
            Ok(_) => self.success("Book deleted successfully!"),
            Err(ClientError::Api { message, .. }) => {
                self.error(&format!("Failed to delete book: {message}"))
            }
            Err(error) => Err(error),
        }
    }

    /// `None` once stdin is closed.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>, ClientError> {
        self.term.write_str(&format!("{label}: "))?;
        let line = self.input.next_line().await?;
        Ok(line.map(|line| line.trim().to_string()))
    }

    /// Prompts with the current value shown; Enter keeps it, `-` drops it.
    async fn edit(&mut self, label: &str, current: &str) -> Result<String, ClientError> {
        let answer = self
            .prompt(&format!("{label} [{}]", style(current).dim()))
            .await?
            .unwrap_or_default();
        Ok(match answer.as_str() {
            "" => current.to_string(),
            "-" => String::new(),
            _ => answer,
        })
    }

    fn heading(&self, text: &str) -> Result<(), ClientError> {
        self.term.write_line("")?;
        self.term.write_line(&style(text).underlined().to_string())?;
        Ok(())
    }

    fn success(&self, text: &str) -> Result<(), ClientError> {
        self.term.write_line(&style(text).green().to_string())?;
        Ok(())
    }

    fn error(&self, text: &str) -> Result<(), ClientError> {
        self.term.write_line(&style(text).red().to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn closed_input_quits() {
        let server = MockServer::start().await;
        let mut menu = Menu::with_input(BookApi::new(server.uri()), &b""[..]);
        menu.run().await.unwrap();
    }

    #[tokio::test]
    async fn add_book_from_typed_answers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/books"))
            .and(body_json(json!({
                "title": "Dune",
                "author": "Herbert",
                "published_year": "1965"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Book added successfully",
                "book_id": "65a1f0c2e4b0a1b2c3d4e5f6"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answers = b"2\nDune\nHerbert\n1965\n\n5\n";
        let mut menu = Menu::with_input(BookApi::new(server.uri()), &answers[..]);
        menu.run().await.unwrap();
    }

    #[tokio::test]
    async fn add_without_author_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let answers = b"2\nDune\n\n\n\nq\n";
        let mut menu = Menu::with_input(BookApi::new(server.uri()), &answers[..]);
        menu.run().await.unwrap();
    }
}
