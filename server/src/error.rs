use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::{KernelError, ValidationFailure};
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        ErrorStatus(
            Report::new(KernelError::Validation(ValidationFailure::MalformedBody))
                .attach_printable(rejection.body_text()),
        )
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let context = self.0.current_context();
        let status = match context {
            KernelError::Validation(_) | KernelError::InvalidIdentifier => StatusCode::BAD_REQUEST,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::StoreUnavailable | KernelError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = ErrorResponse {
            error: context.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
