//! Order repository for database operations.
//!
//! Order creation writes the header and every line item inside one
//! transaction: either all rows are visible afterwards or none are. The
//! foreign key on `order_items.product_id` backstops product existence
//! inside the transaction, so a product deleted after the workflow's batch
//! check still rolls the whole order back.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cartify_core::{OrderId, OrderStatus, PaymentStatus, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::order::{LineItem, Order};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` order header queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_id: i32,
    total: i64,
    status: OrderStatus,
    payment_status: PaymentStatus,
    shipping_address: String,
    delivery_partner_id: Option<i32>,
    tracking_number: Option<String>,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<LineItem>) -> Order {
        Order {
            id: OrderId::new(self.id),
            customer_id: UserId::new(self.customer_id),
            items,
            total: Price::from_minor_units(self.total),
            status: self.status,
            payment_status: self.payment_status,
            shipping_address: self.shipping_address,
            delivery_partner_id: self.delivery_partner_id.map(UserId::new),
            tracking_number: self.tracking_number,
            created_at: self.created_at,
        }
    }
}

/// Internal row type for `PostgreSQL` line item queries.
#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    order_id: i32,
    product_id: i32,
    quantity: i32,
}

impl From<&LineItemRow> for LineItem {
    fn from(row: &LineItemRow) -> Self {
        Self {
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
        }
    }
}

/// Fields for creating an order atomically with its line items.
#[derive(Debug)]
pub struct NewOrder {
    /// Owning customer (always the authenticated caller).
    pub customer_id: UserId,
    /// Line items, already validated.
    pub items: Vec<LineItem>,
    /// Total computed from current catalog prices.
    pub total: Price,
    /// Free-form shipping address.
    pub shipping_address: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order header and all of its line items atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a referenced product vanished
    /// between the workflow's existence check and the insert (foreign key
    /// violation; the transaction is rolled back and nothing is persisted).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new_order: NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let header = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (customer_id, total, status, payment_status, shipping_address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, customer_id, total, status, payment_status,
                      shipping_address, delivery_partner_id, tracking_number,
                      created_at
            ",
        )
        .bind(new_order.customer_id.as_i32())
        .bind(new_order.total.minor_units())
        .bind(OrderStatus::Pending)
        .bind(PaymentStatus::Paid)
        .bind(&new_order.shipping_address)
        .fetch_one(&mut *tx)
        .await?;

        for item in &new_order.items {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(header.id)
            .bind(item.product_id.as_i32())
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("unknown product id".to_owned());
                }
                RepositoryError::Database(e)
            })?;
        }

        tx.commit().await?;

        let items = new_order.items;
        Ok(header.into_order(items))
    }

    /// List all orders owned by a customer, with their line items.
    ///
    /// Newest first: ordered by creation time descending, then ID descending
    /// as a tiebreak so the ordering is stable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_by_customer(
        &self,
        customer_id: UserId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let headers = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, customer_id, total, status, payment_status,
                   shipping_address, delivery_partner_id, tracking_number,
                   created_at
            FROM orders
            WHERE customer_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(customer_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = headers.iter().map(|h| h.id).collect();

        let item_rows = sqlx::query_as::<_, LineItemRow>(
            r"
            SELECT order_id, product_id, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id ASC
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<i32, Vec<LineItem>> = HashMap::new();
        for row in &item_rows {
            items_by_order
                .entry(row.order_id)
                .or_default()
                .push(row.into());
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let items = items_by_order.remove(&header.id).unwrap_or_default();
                header.into_order(items)
            })
            .collect())
    }
}
