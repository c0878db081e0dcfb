use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, BookModule};
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookRequest, UpdateBookRequest,
};
use crate::response::BookPresenter;
use application::service::{
    CreateBookService, DeleteBookService, GetBookService, UpdateBookService,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<Db: BookModule> BookRouter for Router<AppModule<Db>> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule<Db>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.database().get_all_books().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<Db>>,
                 body: Result<Json<CreateBookRequest>, JsonRejection>| async move {
                    let Json(req) = body?;
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule<Db>>, Path(id): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(GetBookRequest::new(id))?
                        .handle(|dto| async move { module.database().get_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(module): State<AppModule<Db>>,
                 Path(id): Path<String>,
                 body: Result<Json<UpdateBookRequest>, JsonRejection>| async move {
                    let Json(req) = body?;
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake((id, req))?
                        .handle(|dto| async move { module.database().update_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<Db>>, Path(id): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(DeleteBookRequest::new(id))?
                        .handle(|dto| async move { module.database().delete_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
