//! Database seeding command.
//!
//! Idempotently creates one demo account per role plus a small starter
//! catalog. Existing rows are left untouched, so the command is safe to
//! re-run against a populated database.

use sqlx::PgPool;

use cartify_core::Role;
use cartify_server::services::auth::password::hash_password;

/// Password for every seeded demo account.
const SEED_PASSWORD: &str = "password123";

/// One demo account per role.
const SEED_USERS: &[(&str, &str, Role)] = &[
    ("Admin User", "admin@cartify.com", Role::Admin),
    ("Seller User", "seller@cartify.com", Role::Seller),
    ("Delivery User", "delivery@cartify.com", Role::Delivery),
    ("Customer User", "customer@cartify.com", Role::Customer),
];

/// Starter catalog: (title, description, category, price in minor units, image).
const SEED_PRODUCTS: &[(&str, &str, &str, i64, &str)] = &[
    (
        "Wireless Headphones",
        "Over-ear wireless headphones with active noise cancellation",
        "electronics",
        549_900,
        "/images/products/headphones.jpg",
    ),
    (
        "Stainless Water Bottle",
        "1L vacuum-insulated bottle, keeps drinks cold for 24 hours",
        "home",
        89_900,
        "/images/products/bottle.jpg",
    ),
    (
        "Running Shoes",
        "Lightweight road running shoes with responsive cushioning",
        "fashion",
        429_900,
        "/images/products/shoes.jpg",
    ),
    (
        "Espresso Maker",
        "Compact stovetop espresso maker for six cups",
        "home",
        199_900,
        "/images/products/espresso.jpg",
    ),
];

/// Errors from seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing failed")]
    PasswordHash,
}

/// Seed demo users and products.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    let database_url = super::database_url().map_err(SeedError::MissingEnvVar)?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    seed_users(&pool).await?;
    seed_products(&pool).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<(), SeedError> {
    for &(name, email, role) in SEED_USERS {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        if exists {
            tracing::info!("User already exists: {email}");
            continue;
        }

        let password_hash = hash_password(SEED_PASSWORD).map_err(|_| SeedError::PasswordHash)?;

        sqlx::query(
            r"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(name)
        .bind(email)
        .bind(&password_hash)
        .bind(role)
        .execute(pool)
        .await?;

        tracing::info!("Created {role}: {email}");
    }

    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<(), SeedError> {
    for &(title, description, category, price, image) in SEED_PRODUCTS {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE title = $1)")
                .bind(title)
                .fetch_one(pool)
                .await?;

        if exists {
            tracing::info!("Product already exists: {title}");
            continue;
        }

        sqlx::query(
            r"
            INSERT INTO products (title, description, category, price, image)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(price)
        .bind(image)
        .execute(pool)
        .await?;

        tracing::info!("Created product: {title}");
    }

    Ok(())
}
