#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an error body; `message` is its `error` field.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
