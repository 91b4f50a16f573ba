//! Database operations for the Cartify `PostgreSQL` database.
//!
//! # Tables
//!
//! - `users` - Accounts with salted password hashes and roles
//! - `products` - The catalog the order workflow prices against
//! - `orders` / `order_items` - Order headers and their line items
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run explicitly
//! via:
//! ```bash
//! cargo run -p cartify-cli -- migrate
//! ```
//!
//! All queries use the runtime query API with `FromRow` row types that are
//! converted into validated domain types; repositories never hand raw rows
//! to callers.

pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Errors returned by repository operations.
#[derive(Debug, thiserror::Error)]
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
