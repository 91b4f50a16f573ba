//! CLI command implementations.

pub mod migrate;
pub mod seed;

/// Resolve the database URL from the environment.
///
/// # Errors
///
/// Returns the missing variable name if neither `CARTIFY_DATABASE_URL` nor
/// `DATABASE_URL` is set.
pub fn database_url() -> Result<String, &'static str> {
    dotenvy::dotenv().ok();

    std::env::var("CARTIFY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| "CARTIFY_DATABASE_URL")
}
