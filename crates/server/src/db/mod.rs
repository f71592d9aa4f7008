//! Database operations for the stylist `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Google-authenticated accounts, upserted on `google_id`
//! - `wardrobe_items` - Per-user wardrobe inventory
//!
//! # Schema
//!
//! The schema is created idempotently at startup via [`init_schema`]
//! (`CREATE TABLE IF NOT EXISTS`); there is no separate migration step.
//!
//! Queries are runtime-checked (`sqlx::query`/`query_as`) so the crate
//! builds without a live database.

pub mod users;
pub mod wardrobe;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use users::UserRepository;
pub use wardrobe::WardrobeRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// A referenced row does not exist (foreign-key violation).
    #[error("unknown reference: {0}")]
    UnknownReference(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create the `users` and `wardrobe_items` tables if they do not exist.
///
/// Safe to run on every startup.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if either statement fails.
pub async fn init_schema(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            google_id VARCHAR(255) UNIQUE,
            email VARCHAR(255) UNIQUE,
            name VARCHAR(255),
            picture TEXT,
            created_at TIMESTAMPTZ DEFAULT now()
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS wardrobe_items (
            id SERIAL PRIMARY KEY,
            user_id INTEGER REFERENCES users(id),
            category VARCHAR(50) NOT NULL,
            color VARCHAR(50),
            season VARCHAR(50),
            occasion VARCHAR(100),
            purchase_price NUMERIC(10, 2) DEFAULT 0,
            image_url TEXT,
            created_at TIMESTAMPTZ DEFAULT now()
        )
        ",
    )
    .execute(pool)
    .await?;

    tracing::info!("database schema ready");
    Ok(())
}
