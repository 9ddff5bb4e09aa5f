//! JSON body extraction helpers.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to
/// [`AppError::BadRequest`].
///
/// Handlers take `Result<Json<T>, JsonRejection>` instead of `Json<T>`
/// so a malformed body — including an unknown field on a
/// `deny_unknown_fields` type — becomes a 400 with the parser's message
/// in the standard error body instead of Axum's plain-text rejection.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(value)| value)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
