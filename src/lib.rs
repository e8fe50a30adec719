//! Star Wars catalog REST backend: users, characters, planets, starships and favorites.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{Config, DatabaseBackend};
pub use error::{AppError, ConfigError};
pub use routes::{app, catalog_routes, common_routes};
pub use state::AppState;
pub use store::{CatalogStore, SqlStore};
