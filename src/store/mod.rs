//! Storage interface injected into handlers, and its sqlx implementation.

mod schema;
mod sql;

pub use sql::{DbPool, SqlStore};

use crate::error::AppError;
use crate::models::{
    Character, CharacterFields, Favorite, FavoriteKind, NewUser, Planet, PlanetFields, Starship, StarshipFields,
    User,
};
use async_trait::async_trait;

/// Single-statement reads and writes over the catalog tables.
///
/// Create methods expect the caller to have checked required fields; `name` is
/// taken from the fields payload and must be present.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn insert_user(&self, user: &NewUser) -> Result<User, AppError>;
    /// Returns false when no row had that id.
    async fn delete_user(&self, id: i64) -> Result<bool, AppError>;

    async fn list_characters(&self) -> Result<Vec<Character>, AppError>;
    async fn get_character(&self, id: i64) -> Result<Option<Character>, AppError>;
    async fn insert_character(&self, name: &str, fields: &CharacterFields) -> Result<Character, AppError>;
    async fn update_character(&self, character: &Character) -> Result<(), AppError>;

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError>;
    async fn get_planet(&self, id: i64) -> Result<Option<Planet>, AppError>;
    async fn insert_planet(&self, name: &str, fields: &PlanetFields) -> Result<Planet, AppError>;
    async fn update_planet(&self, planet: &Planet) -> Result<(), AppError>;

    async fn list_starships(&self) -> Result<Vec<Starship>, AppError>;
    async fn get_starship(&self, id: i64) -> Result<Option<Starship>, AppError>;
    async fn insert_starship(&self, name: &str, fields: &StarshipFields) -> Result<Starship, AppError>;
    async fn update_starship(&self, starship: &Starship) -> Result<(), AppError>;

    /// Whether the catalog row a favorite of `kind` would point at exists.
    async fn target_exists(&self, kind: FavoriteKind, target_id: i64) -> Result<bool, AppError>;
    async fn list_favorites(&self, kind: FavoriteKind) -> Result<Vec<Favorite>, AppError>;
    async fn list_user_favorites(&self, kind: FavoriteKind, user_id: i64) -> Result<Vec<Favorite>, AppError>;
    /// Inserts unconditionally; duplicates are allowed.
    async fn insert_favorite(
        &self,
        kind: FavoriteKind,
        target_id: i64,
        user_id: Option<i64>,
    ) -> Result<Favorite, AppError>;
    /// Lowest-id favorite row pointing at `target_id`.
    async fn first_favorite(&self, kind: FavoriteKind, target_id: i64) -> Result<Option<Favorite>, AppError>;
    async fn delete_favorite(&self, kind: FavoriteKind, id: i64) -> Result<bool, AppError>;
}
