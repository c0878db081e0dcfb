use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::book::{Book, BookForm};
use crate::error::ClientError;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct CreatedBody {
    book_id: String,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// Thin wrapper over the five book endpoints.
pub struct BookApi {
    client: Client,
    base_url: String,
}

impl BookApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        let response = self.client.get(self.url("/books")).send().await?;
        read(response, StatusCode::OK).await
    }

    pub async fn get_book(&self, id: &str) -> Result<Book, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/books/{id}")))
            .send()
            .await?;
        read(response, StatusCode::OK).await
    }

    /// Returns the id the server assigned.
    pub async fn add_book(&self, form: &BookForm) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url("/books"))
            .json(&form.to_body())
            .send()
            .await?;
        let created: CreatedBody = read(response, StatusCode::CREATED).await?;
        Ok(created.book_id)
    }

    pub async fn update_book(&self, id: &str, form: &BookForm) -> Result<String, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/books/{id}")))
            .json(&form.to_body())
            .send()
            .await?;
        let body: MessageBody = read(response, StatusCode::OK).await?;
        Ok(body.message)
    }

    pub async fn delete_book(&self, id: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/books/{id}")))
            .send()
            .await?;
        let body: MessageBody = read(response, StatusCode::OK).await?;
        Ok(body.message)
    }
}

async fn read<T: DeserializeOwned>(response: Response, expected: StatusCode) -> Result<T, ClientError> {
    let status = response.status();
    if status == expected {
        return Ok(response.json().await?);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    tracing::debug!("{status}: {message}");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    static ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    #[tokio::test]
    async fn lists_books() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "_id": ID, "title": "Dune", "author": "Herbert", "genre": "SciFi" }
            ])))
            .mount(&server)
            .await;

        let books = BookApi::new(server.uri()).list_books().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, ID);
        assert_eq!(books[0].genre_label(), "SciFi");
        assert_eq!(books[0].published_year_label(), "N/A");
    }

    #[tokio::test]
    async fn add_sends_only_filled_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/books"))
            .and(body_json(json!({ "title": "Dune", "author": "Herbert" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Book added successfully",
                "book_id": ID
            })))
            .expect(1)
            .mount(&server)
            .await;

        let form = BookForm {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            ..Default::default()
        };
        let id = BookApi::new(server.uri()).add_book(&form).await.unwrap();
        assert_eq!(id, ID);
    }

    #[tokio::test]
    async fn server_errors_are_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/books/{ID}")))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Book not found" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path(format!("/books/{ID}")))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "No fields to update" })),
            )
            .mount(&server)
            .await;

        let api = BookApi::new(format!("{}/", server.uri()));
        match api.get_book(ID).await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Book not found");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
        let error = api.update_book(ID, &BookForm::default()).await.unwrap_err();
        assert_eq!(error.to_string(), "No fields to update");
    }

    #[tokio::test]
    async fn delete_returns_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/books/{ID}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message": "Book deleted successfully" })),
            )
            .mount(&server)
            .await;

        let message = BookApi::new(server.uri()).delete_book(ID).await.unwrap();
        assert_eq!(message, "Book deleted successfully");
    }
}
