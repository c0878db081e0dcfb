use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::BookApi;
use crate::error::ClientError;
use crate::menu::Menu;

mod api;
mod book;
mod error;
mod menu;

/// Interactive terminal client for the book management API.
#[derive(Debug, Parser)]
#[command(name = "book-client", version)]
struct Cli {
    /// Base URL of the book service.
    #[arg(long, env = "BOOK_API_URL", default_value = "http://127.0.0.1:5000")]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("Talking to {}", cli.api_url);
    Menu::new(BookApi::new(cli.api_url)).run().await
}
