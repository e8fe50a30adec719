//! HTTP handlers for users, catalog entities and favorites.

pub mod catalog;
pub mod favorites;
pub mod users;

pub use catalog::*;
pub use favorites::*;
pub use users::*;

use crate::error::AppError;
use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};

pub(crate) fn missing_fields() -> AppError {
    AppError::BadRequest("Missing required fields".into())
}

/// Unwrap a create payload. Oversized bodies stay 413; an absent or
/// unparseable body is reported as missing fields.
pub(crate) fn required_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(rejection.into()),
        Err(_) => Err(missing_fields()),
    }
}
