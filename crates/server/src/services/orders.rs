//! Order workflow.
//!
//! Validates a cart against live catalog data, computes the total from
//! current prices (never a client-supplied figure), and persists the order
//! atomically. The order owner is always the authenticated caller; no part
//! of this module accepts a caller-supplied owner ID.

use std::collections::{BTreeSet, HashMap};

use sqlx::PgPool;
use thiserror::Error;

use cartify_core::{Price, ProductId};

use crate::db::RepositoryError;
use crate::db::orders::{NewOrder, OrderRepository};
use crate::db::products::ProductRepository;
use crate::models::order::{LineItem, Order};
use crate::models::user::Identity;

/// Errors that can occur while placing or listing orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The cart is empty.
    #[error("order must contain at least one item")]
    Empty,

    /// A line item has a quantity below 1.
    #[error("line item quantity must be at least 1")]
    InvalidQuantity,

    /// A referenced product does not exist.
    #[error("unknown product id")]
    UnknownProduct,

    /// The total does not fit in the price representation.
    #[error("order total out of range")]
    TotalOutOfRange,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Order workflow service.
pub struct OrderService<'a> {
    products: ProductRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// Validate a cart, price it against the current catalog, and persist
    /// the order atomically.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Empty` / `OrderError::InvalidQuantity` before
    /// any store interaction; `OrderError::UnknownProduct` when the batch
    /// lookup resolves fewer products than the distinct IDs requested (no
    /// partial orders); `OrderError::Repository` on store failure.
    pub async fn place_order(
        &self,
        customer: Identity,
        items: &[LineItem],
        shipping_address: String,
    ) -> Result<Order, OrderError> {
        validate_items(items)?;

        // Resolve every referenced product in one batch
        let distinct_ids: BTreeSet<ProductId> = items.iter().map(|i| i.product_id).collect();
        let requested: Vec<ProductId> = distinct_ids.iter().copied().collect();
        let products = self.products.get_by_ids(&requested).await?;

        if products.len() != distinct_ids.len() {
            return Err(OrderError::UnknownProduct);
        }

        let prices: HashMap<ProductId, Price> =
            products.into_iter().map(|p| (p.id, p.price)).collect();

        let total = order_total(items, &prices)?;

        let order = self
            .orders
            .create(NewOrder {
                customer_id: customer.id,
                items: items.to_vec(),
                total,
                shipping_address,
            })
            .await
            .map_err(|e| match e {
                // FK backstop fired inside the transaction
                RepositoryError::Conflict(_) => OrderError::UnknownProduct,
                other => OrderError::Repository(other),
            })?;

        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            total = %order.total,
            items = order.items.len(),
            "order placed"
        );

        Ok(order)
    }

    /// List the caller's orders with their items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` on store failure.
    pub async fn list_my_orders(&self, customer: Identity) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_by_customer(customer.id).await?)
    }
}

/// Reject empty carts and non-positive quantities.
///
/// Runs before any store interaction.
fn validate_items(items: &[LineItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::Empty);
    }

    if items.iter().any(|item| item.quantity < 1) {
        return Err(OrderError::InvalidQuantity);
    }

    Ok(())
}

/// Compute the order total from current catalog prices.
///
/// Every line item must have a resolved price; quantities were validated
/// beforehand. Checked arithmetic throughout - an overflowing cart is
/// rejected, not wrapped.
fn order_total(
    items: &[LineItem],
    prices: &HashMap<ProductId, Price>,
) -> Result<Price, OrderError> {
    let mut total = Price::ZERO;

    for item in items {
        let price = prices.get(&item.product_id).ok_or(OrderError::UnknownProduct)?;
        let line = price
            .checked_mul(i64::from(item.quantity))
            .ok_or(OrderError::TotalOutOfRange)?;
        total = total.checked_add(line).ok_or(OrderError::TotalOutOfRange)?;
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(product_id: i32, quantity: i32) -> LineItem {
        LineItem {
            product_id: ProductId::new(product_id),
            quantity,
        }
    }

    fn catalog(entries: &[(i32, i64)]) -> HashMap<ProductId, Price> {
        entries
            .iter()
            .map(|&(id, units)| (ProductId::new(id), Price::from_minor_units(units)))
            .collect()
    }

    #[test]
    fn test_validate_rejects_empty_cart() {
        assert!(matches!(validate_items(&[]), Err(OrderError::Empty)));
    }

    #[test]
    fn test_validate_rejects_zero_and_negative_quantities() {
        assert!(matches!(
            validate_items(&[item(1, 0)]),
            Err(OrderError::InvalidQuantity)
        ));
        assert!(matches!(
            validate_items(&[item(1, 2), item(2, -3)]),
            Err(OrderError::InvalidQuantity)
        ));
    }

    #[test]
    fn test_validate_accepts_positive_quantities() {
        assert!(validate_items(&[item(1, 1), item(2, 40)]).is_ok());
    }

    #[test]
    fn test_total_sums_quantity_times_price() {
        // [(P1, 2), (P2, 1)] with P1=10, P2=5 => 25
        let prices = catalog(&[(1, 10), (2, 5)]);
        let total = order_total(&[item(1, 2), item(2, 1)], &prices).unwrap();
        assert_eq!(total, Price::from_minor_units(25));
    }

    #[test]
    fn test_total_prices_duplicate_ids_per_line() {
        let prices = catalog(&[(1, 100)]);
        let total = order_total(&[item(1, 1), item(1, 2)], &prices).unwrap();
        assert_eq!(total, Price::from_minor_units(300));
    }

    #[test]
    fn test_total_rejects_missing_price() {
        let prices = catalog(&[(1, 10)]);
        assert!(matches!(
            order_total(&[item(1, 1), item(99, 1)], &prices),
            Err(OrderError::UnknownProduct)
        ));
    }

    #[test]
    fn test_total_rejects_overflow() {
        let prices = catalog(&[(1, i64::MAX)]);
        assert!(matches!(
            order_total(&[item(1, 2)], &prices),
            Err(OrderError::TotalOutOfRange)
        ));
    }
}
