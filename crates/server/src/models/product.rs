//! Product domain types.

use chrono::{DateTime, Utc};

use cartify_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Product description.
    pub description: String,
    /// Category name.
    pub category: String,
    /// Current price in minor currency units. Orders are always priced
    /// against this value, never a client-supplied one.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or replacing a product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Price,
    pub image: String,
}
