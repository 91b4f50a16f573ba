//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (verifies database)
//!
//! # Auth
//! POST /auth/register       - Register, returns a bearer token
//! POST /auth/login          - Login, returns a bearer token
//! GET  /auth/me             - Current user profile (authenticated)
//!
//! # Products
//! GET    /products          - Product listing
//! GET    /products/{id}     - Product detail
//! POST   /products          - Create product (seller/admin)
//! PUT    /products/{id}     - Update product (seller/admin)
//! DELETE /products/{id}     - Delete product (seller/admin)
//!
//! # Orders
//! POST /orders              - Place an order (customer)
//! GET  /orders/me           - The caller's orders, newest first (customer)
//! ```
//!
//! Role policy lives in the handlers as `authorize(&user, ROLES)?` calls,
//! nowhere else.

pub mod auth;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the application router (health endpoints are wired in `main`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(product_routes())
        .merge(order_routes())
}

/// Create the auth routes router.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
}

/// Create the product routes router.
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::remove),
        )
}

/// Create the order routes router.
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(orders::create))
        .route("/orders/me", get(orders::my_orders))
}
