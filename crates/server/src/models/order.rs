//! Order domain types.

use chrono::{DateTime, Utc};

use cartify_core::{OrderId, OrderStatus, PaymentStatus, Price, ProductId, UserId};

/// An order header together with all of its line items.
///
/// Invariant: `total` equals the sum over items of
/// `quantity x product price at order time`, and the items were written in
/// the same transaction as the header - readers never observe a subset.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The customer who placed the order.
    pub customer_id: UserId,
    /// Line items, in the order they were submitted.
    pub items: Vec<LineItem>,
    /// Total at order time, in minor currency units.
    pub total: Price,
    /// Lifecycle status (created as pending).
    pub status: OrderStatus,
    /// Payment status (recorded as paid; capture is out of scope).
    pub payment_status: PaymentStatus,
    /// Free-form shipping address.
    pub shipping_address: String,
    /// Delivery partner assigned to the order, if any.
    pub delivery_partner_id: Option<UserId>,
    /// Carrier tracking number, if any.
    pub tracking_number: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// One product + quantity pair within an order.
///
/// Owned exclusively by its order and immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    /// The ordered product.
    pub product_id: ProductId,
    /// Quantity, always >= 1.
    pub quantity: i32,
}
