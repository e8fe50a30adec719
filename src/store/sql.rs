//! sqlx-backed [`CatalogStore`] over PostgreSQL or SQLite.
//!
//! Statements use `$n` placeholders, which both drivers accept, so each query is
//! written once and executed against whichever pool is configured.

use super::schema::ensure_tables;
use super::CatalogStore;
use crate::config::{Config, DatabaseBackend};
use crate::error::AppError;
use crate::models::{
    Character, CharacterFields, Favorite, FavoriteKind, NewUser, Planet, PlanetFields, Starship, StarshipFields,
    User,
};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Run the same expression against whichever pool is active.
macro_rules! on_pool {
    ($pool:expr, $conn:ident => $body:expr) => {
        match $pool {
            DbPool::Postgres($conn) => $body,
            DbPool::Sqlite($conn) => $body,
        }
    };
}

const USER_COLUMNS: &str = "id, email, password, first_name, last_name, is_active";

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: i64,
    user_id: Option<i64>,
    target_id: i64,
}

impl FavoriteRow {
    fn into_favorite(self, kind: FavoriteKind) -> Favorite {
        Favorite {
            kind,
            id: self.id,
            user_id: self.user_id,
            target_id: self.target_id,
        }
    }
}

fn favorite_select(kind: FavoriteKind) -> String {
    format!(
        "SELECT id, user_id, {} AS target_id FROM {}",
        kind.target_column(),
        kind.table()
    )
}

#[derive(Clone, Debug)]
pub struct SqlStore {
    pool: DbPool,
}

impl SqlStore {
    /// Open a pool for the configured backend and create missing tables.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let pool = match config.backend {
            DatabaseBackend::Postgres => DbPool::Postgres(
                PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(&config.database_url)
                    .await?,
            ),
            DatabaseBackend::Sqlite => {
                let options = SqliteConnectOptions::from_str(&config.database_url)?
                    .create_if_missing(true)
                    .foreign_keys(true);
                DbPool::Sqlite(
                    SqlitePoolOptions::new()
                        .max_connections(config.max_connections)
                        .connect_with(options)
                        .await?,
                )
            }
        };
        ensure_tables(&pool).await?;
        tracing::info!(backend = ?config.backend, "database ready");
        Ok(SqlStore { pool })
    }

    /// Private in-memory SQLite database. A single connection that never expires,
    /// since each SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        let pool = DbPool::Sqlite(pool);
        ensure_tables(&pool).await?;
        Ok(SqlStore { pool })
    }
}

#[async_trait]
impl CatalogStore for SqlStore {
    async fn ping(&self) -> Result<(), AppError> {
        on_pool!(&self.pool, p => sqlx::query("SELECT 1").execute(p).await.map(|_| ()))?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = on_pool!(&self.pool, p => sqlx::query_as::<_, User>(&sql).fetch_all(p).await)?;
        Ok(rows)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = on_pool!(&self.pool, p => sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(p).await)?;
        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1 ORDER BY id LIMIT 1", USER_COLUMNS);
        let row = on_pool!(&self.pool, p => sqlx::query_as::<_, User>(&sql).bind(email).fetch_optional(p).await)?;
        Ok(row)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, AppError> {
        let sql = "INSERT INTO users (email, password, first_name, last_name, is_active) \
                   VALUES ($1, $2, $3, $4, $5) RETURNING id";
        let inserted = on_pool!(&self.pool, p => sqlx::query_scalar::<_, i64>(sql)
            .bind(user.email.as_str())
            .bind(user.password.as_str())
            .bind(user.first_name.as_str())
            .bind(user.last_name.as_str())
            .bind(user.is_active)
            .fetch_one(p)
            .await);
        let id = match inserted {
            Ok(id) => id,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(AppError::BadRequest("Email already exists".into()));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(id, "user inserted");
        self.get_user(id).await?.ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let affected = on_pool!(&self.pool, p => sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(p)
            .await
            .map(|r| r.rows_affected()))?;
        Ok(affected > 0)
    }

    async fn list_characters(&self) -> Result<Vec<Character>, AppError> {
        let sql = "SELECT id, name, gender, height FROM characters ORDER BY id";
        let rows = on_pool!(&self.pool, p => sqlx::query_as::<_, Character>(sql).fetch_all(p).await)?;
        Ok(rows)
    }

    async fn get_character(&self, id: i64) -> Result<Option<Character>, AppError> {
        let sql = "SELECT id, name, gender, height FROM characters WHERE id = $1";
        let row = on_pool!(&self.pool, p => sqlx::query_as::<_, Character>(sql).bind(id).fetch_optional(p).await)?;
        Ok(row)
    }

    async fn insert_character(&self, name: &str, fields: &CharacterFields) -> Result<Character, AppError> {
        let sql = "INSERT INTO characters (name, gender, height) VALUES ($1, $2, $3) RETURNING id";
        let id = on_pool!(&self.pool, p => sqlx::query_scalar::<_, i64>(sql)
            .bind(name)
            .bind(fields.gender.as_deref())
            .bind(fields.height.as_deref())
            .fetch_one(p)
            .await)?;
        self.get_character(id).await?.ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update_character(&self, character: &Character) -> Result<(), AppError> {
        let sql = "UPDATE characters SET name = $1, gender = $2, height = $3 WHERE id = $4";
        on_pool!(&self.pool, p => sqlx::query(sql)
            .bind(character.name.as_str())
            .bind(character.gender.as_deref())
            .bind(character.height.as_deref())
            .bind(character.id)
            .execute(p)
            .await
            .map(|_| ()))?;
        Ok(())
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        let sql = "SELECT id, name, weather FROM planets ORDER BY id";
        let rows = on_pool!(&self.pool, p => sqlx::query_as::<_, Planet>(sql).fetch_all(p).await)?;
        Ok(rows)
    }

    async fn get_planet(&self, id: i64) -> Result<Option<Planet>, AppError> {
        let sql = "SELECT id, name, weather FROM planets WHERE id = $1";
        let row = on_pool!(&self.pool, p => sqlx::query_as::<_, Planet>(sql).bind(id).fetch_optional(p).await)?;
        Ok(row)
    }

    async fn insert_planet(&self, name: &str, fields: &PlanetFields) -> Result<Planet, AppError> {
        let sql = "INSERT INTO planets (name, weather) VALUES ($1, $2) RETURNING id";
        let id = on_pool!(&self.pool, p => sqlx::query_scalar::<_, i64>(sql)
            .bind(name)
            .bind(fields.weather.as_deref())
            .fetch_one(p)
            .await)?;
        self.get_planet(id).await?.ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update_planet(&self, planet: &Planet) -> Result<(), AppError> {
        let sql = "UPDATE planets SET name = $1, weather = $2 WHERE id = $3";
        on_pool!(&self.pool, p => sqlx::query(sql)
            .bind(planet.name.as_str())
            .bind(planet.weather.as_deref())
            .bind(planet.id)
            .execute(p)
            .await
            .map(|_| ()))?;
        Ok(())
    }

    async fn list_starships(&self) -> Result<Vec<Starship>, AppError> {
        let sql = "SELECT id, name, color FROM starships ORDER BY id";
        let rows = on_pool!(&self.pool, p => sqlx::query_as::<_, Starship>(sql).fetch_all(p).await)?;
        Ok(rows)
    }

    async fn get_starship(&self, id: i64) -> Result<Option<Starship>, AppError> {
        let sql = "SELECT id, name, color FROM starships WHERE id = $1";
        let row = on_pool!(&self.pool, p => sqlx::query_as::<_, Starship>(sql).bind(id).fetch_optional(p).await)?;
        Ok(row)
    }

    async fn insert_starship(&self, name: &str, fields: &StarshipFields) -> Result<Starship, AppError> {
        let sql = "INSERT INTO starships (name, color) VALUES ($1, $2) RETURNING id";
        let id = on_pool!(&self.pool, p => sqlx::query_scalar::<_, i64>(sql)
            .bind(name)
            .bind(fields.color.as_deref())
            .fetch_one(p)
            .await)?;
        self.get_starship(id).await?.ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update_starship(&self, starship: &Starship) -> Result<(), AppError> {
        let sql = "UPDATE starships SET name = $1, color = $2 WHERE id = $3";
        on_pool!(&self.pool, p => sqlx::query(sql)
            .bind(starship.name.as_str())
            .bind(starship.color.as_deref())
            .bind(starship.id)
            .execute(p)
            .await
            .map(|_| ()))?;
        Ok(())
    }

    async fn target_exists(&self, kind: FavoriteKind, target_id: i64) -> Result<bool, AppError> {
        let sql = format!("SELECT id FROM {} WHERE id = $1", kind.target_table());
        let found = on_pool!(&self.pool, p => sqlx::query_scalar::<_, i64>(&sql)
            .bind(target_id)
            .fetch_optional(p)
            .await)?;
        Ok(found.is_some())
    }

    async fn list_favorites(&self, kind: FavoriteKind) -> Result<Vec<Favorite>, AppError> {
        let sql = format!("{} ORDER BY id", favorite_select(kind));
        let rows = on_pool!(&self.pool, p => sqlx::query_as::<_, FavoriteRow>(&sql).fetch_all(p).await)?;
        Ok(rows.into_iter().map(|r| r.into_favorite(kind)).collect())
    }

    async fn list_user_favorites(&self, kind: FavoriteKind, user_id: i64) -> Result<Vec<Favorite>, AppError> {
        let sql = format!("{} WHERE user_id = $1 ORDER BY id", favorite_select(kind));
        let rows = on_pool!(&self.pool, p => sqlx::query_as::<_, FavoriteRow>(&sql)
            .bind(user_id)
            .fetch_all(p)
            .await)?;
        Ok(rows.into_iter().map(|r| r.into_favorite(kind)).collect())
    }

    async fn insert_favorite(
        &self,
        kind: FavoriteKind,
        target_id: i64,
        user_id: Option<i64>,
    ) -> Result<Favorite, AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, {}) VALUES ($1, $2) RETURNING id",
            kind.table(),
            kind.target_column()
        );
        let id = on_pool!(&self.pool, p => sqlx::query_scalar::<_, i64>(&sql)
            .bind(user_id)
            .bind(target_id)
            .fetch_one(p)
            .await)?;
        tracing::debug!(table = kind.table(), id, target_id, "favorite inserted");
        Ok(Favorite {
            kind,
            id,
            user_id,
            target_id,
        })
    }

    async fn first_favorite(&self, kind: FavoriteKind, target_id: i64) -> Result<Option<Favorite>, AppError> {
        let sql = format!(
            "{} WHERE {} = $1 ORDER BY id LIMIT 1",
            favorite_select(kind),
            kind.target_column()
        );
        let row = on_pool!(&self.pool, p => sqlx::query_as::<_, FavoriteRow>(&sql)
            .bind(target_id)
            .fetch_optional(p)
            .await)?;
        Ok(row.map(|r| r.into_favorite(kind)))
    }

    async fn delete_favorite(&self, kind: FavoriteKind, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let affected = on_pool!(&self.pool, p => sqlx::query(&sql)
            .bind(id)
            .execute(p)
            .await
            .map(|r| r.rows_affected()))?;
        Ok(affected > 0)
    }
}
