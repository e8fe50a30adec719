//! Path parameters that answer 404 (not axum's plain-text 400) when they fail to parse.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Like [`Path`], but a segment that does not parse (e.g. `/planet/abc`) is
/// treated as a route that does not exist.
#[derive(Clone, Debug)]
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidPath(value)),
            Err(rejection) => {
                tracing::debug!(uri = %parts.uri, %rejection, "path parameter rejected");
                Err(AppError::NotFound("Resource not found".into()))
            }
        }
    }
}
