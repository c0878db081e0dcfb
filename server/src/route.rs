use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{AppModule, BookModule};

pub use self::book::*;

mod book;

static WELCOME: &str = "Welcome to the Book Management System!";

pub trait IndexRouter {
    fn route_index(self) -> Self;
}

impl<S> IndexRouter for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn route_index(self) -> Self {
        self.route("/", get(|| async { WELCOME }))
    }
}

pub fn router<Db: BookModule>(module: AppModule<Db>) -> Router {
    Router::<AppModule<Db>>::new()
        .route_index()
        .route_book()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(module)
}
