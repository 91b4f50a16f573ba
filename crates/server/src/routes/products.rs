//! Product catalog route handlers.
//!
//! Reads are public; mutations are gated to sellers and admins.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use cartify_core::{Price, ProductId, Role};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::{CurrentUser, authorize};
use crate::models::product::{Product, ProductDraft};
use crate::state::AppState;

/// Roles allowed to mutate the catalog.
const CATALOG_WRITERS: &[Role] = &[Role::Seller, Role::Admin];

// =============================================================================
// Request / Response Types
// =============================================================================

/// Create/update request body for a product.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    /// Price in minor currency units.
    pub price: i64,
    pub image: String,
}

impl ProductRequest {
    fn into_draft(self) -> Result<ProductDraft> {
        if self.price < 0 {
            return Err(AppError::InvalidRequest(
                "price must not be negative".to_owned(),
            ));
        }

        Ok(ProductDraft {
            title: self.title,
            description: self.description,
            category: self.category,
            price: Price::from_minor_units(self.price),
            image: self.image,
        })
    }
}

/// Public view of a product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Price in minor currency units.
    pub price: Price,
    pub image: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            category: product.category,
            price: product.price,
            image: product.image,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all products.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Get a product by ID.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_owned()))?;

    Ok(Json(product.into()))
}

/// Create a product. Sellers and admins only.
pub async fn create(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    authorize(&user, CATALOG_WRITERS)?;

    let draft = body.into_draft()?;
    let product = ProductRepository::new(state.pool()).create(&draft).await?;

    tracing::info!(product_id = %product.id, user_id = %user.id, "product created");

    Ok(Json(product.into()))
}

/// Replace a product's fields. Sellers and admins only.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
pub async fn update(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    authorize(&user, CATALOG_WRITERS)?;

    let draft = body.into_draft()?;
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &draft)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound("product".to_owned()),
            other => other.into(),
        })?;

    Ok(Json(product.into()))
}

/// Delete a product. Sellers and admins only.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist, 400 if orders still reference
/// it.
pub async fn remove(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    authorize(&user, CATALOG_WRITERS)?;

    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound("product".to_owned()),
            other => other.into(),
        })?;

    tracing::info!(product_id = id, user_id = %user.id, "product deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}
