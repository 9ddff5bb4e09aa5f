//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure returns the JSON body the front end consumes,
//! `{"error": "<message>"}`, with the status the original contract uses:
//! validation and store failures are 400, missing rows are 404, and
//! unexpected failures are 500 with the message logged but not exposed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Update/delete target missing (404).
    #[error("no se encontró el registro")]
    NotFound,

    /// Request failed domain validation (400).
    #[error("{0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("{0}")]
    BadRequest(String),

    /// The underlying store rejected an operation (400). The store's
    /// message is passed through verbatim, as the front end expects.
    #[error("{0}")]
    Storage(String),

    /// Unexpected failure (500). Message is logged, never returned.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) | Self::Storage(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "error interno del servidor".to_string()
            }
            Self::Storage(_) => {
                tracing::warn!(error = %self, "store operation failed");
                self.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<taller_core::ValidationError> for AppError {
    fn from(err: taller_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
