//! Table DDL per backend. Tables are created if missing; existing tables are left alone.

use super::sql::DbPool;
use crate::error::AppError;

const POSTGRES_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        gender TEXT,
        height TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS planets (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        weather TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS starships (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        color TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_characters (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT REFERENCES users(id) ON DELETE CASCADE,
        character_id BIGINT NOT NULL REFERENCES characters(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_planets (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT REFERENCES users(id) ON DELETE CASCADE,
        planet_id BIGINT NOT NULL REFERENCES planets(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_starships (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT REFERENCES users(id) ON DELETE CASCADE,
        starship_id BIGINT NOT NULL REFERENCES starships(id) ON DELETE CASCADE
    )
    "#,
];

const SQLITE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        gender TEXT,
        height TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS planets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        weather TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS starships (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        color TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_characters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES users(id) ON DELETE CASCADE,
        character_id INTEGER NOT NULL REFERENCES characters(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_planets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES users(id) ON DELETE CASCADE,
        planet_id INTEGER NOT NULL REFERENCES planets(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_starships (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES users(id) ON DELETE CASCADE,
        starship_id INTEGER NOT NULL REFERENCES starships(id) ON DELETE CASCADE
    )
    "#,
];

/// Create the catalog tables that do not exist yet. One statement per call so
/// PostgreSQL prepared statements accept it.
pub async fn ensure_tables(pool: &DbPool) -> Result<(), AppError> {
    match pool {
        DbPool::Postgres(pool) => {
            for ddl in POSTGRES_TABLES {
                sqlx::query(ddl).execute(pool).await?;
            }
        }
        DbPool::Sqlite(pool) => {
            for ddl in SQLITE_TABLES {
                sqlx::query(ddl).execute(pool).await?;
            }
        }
    }
    tracing::debug!("catalog tables ensured");
    Ok(())
}
