//! Common routes: sitemap, health, readiness, version.

use crate::routes::catalog::ENDPOINTS;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Liveness and readiness share one shape; `database` is only reported by `/ready`.
#[derive(Serialize)]
struct ProbeBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

const BUILD: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

#[derive(Serialize)]
struct Endpoint {
    method: &'static str,
    path: &'static str,
}

#[derive(Serialize)]
struct SitemapBody {
    data: Vec<Endpoint>,
}

async fn sitemap() -> Json<SitemapBody> {
    let data = ENDPOINTS
        .iter()
        .map(|&(method, path)| Endpoint { method, path })
        .collect();
    Json(SitemapBody { data })
}

/// Process is up; does not touch the store.
async fn liveness() -> Json<ProbeBody> {
    Json(ProbeBody {
        status: "ok",
        database: None,
    })
}

async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ProbeBody>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ProbeBody {
                status: "ok",
                database: Some("ok"),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "store ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeBody {
                    status: "degraded",
                    database: Some("unavailable"),
                }),
            )
        }
    }
}

async fn build_info() -> Json<&'static BuildInfo> {
    Json(&BUILD)
}

/// GET /, /health, /ready, /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(sitemap))
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/version", get(build_info))
        .with_state(state)
}
