//! Router assembly.

pub mod catalog;
pub mod common;

pub use catalog::catalog_routes;
pub use common::common_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

async fn fallback() -> AppError {
    AppError::NotFound("Resource not found".into())
}

/// The full service. Trailing slashes are trimmed before routing, so
/// `/planet/` and `/planet` hit the same handler. Bodies over `body_limit`
/// are rejected by the JSON extractor with a 413 `{message}`.
pub fn app(state: AppState, body_limit: usize) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(catalog_routes(state))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
