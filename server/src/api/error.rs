use std::any::Any;

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use recipebox_core::{Envelope, ValidationErrors};
use thiserror::Error;

/// Every way a request can fail, each mapped to one status and envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Invalid recipe ID format")]
    MalformedId,

    #[error("Recipe not found")]
    NotFound,

    #[error("Route not found")]
    RouteNotFound,

    /// `detail` is only filled in development mode.
    #[error("{message}")]
    Internal {
        message: &'static str,
        detail: Option<String>,
    },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let message = self.to_string();
        let (status, envelope) = match self {
            AppError::BadRequest(_) | AppError::MalformedId => {
                (StatusCode::BAD_REQUEST, Envelope::failure(message))
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Envelope::failure(message).with_errors(errors.messages()),
            ),
            AppError::NotFound | AppError::RouteNotFound => {
                (StatusCode::NOT_FOUND, Envelope::failure(message))
            }
            AppError::Internal { detail, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Envelope::failure(message).with_detail(detail),
            ),
        };

        (status, Json(envelope)).into_response()
    }
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

/// Builds the 500 envelope for a handler that panicked.
pub fn panic_response(
    expose_errors: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response<Body> + Clone {
    move |panic| {
        let detail = if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic".to_string()
        };

        tracing::error!(panic = %detail, "handler panicked");

        AppError::Internal {
            message: "Internal server error",
            detail: expose_errors.then_some(detail),
        }
        .into_response()
    }
}
