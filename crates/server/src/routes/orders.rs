//! Order route handlers.
//!
//! Both endpoints are customer-only; the guard supplies the caller's
//! identity and the workflow never accepts an owner ID from the request.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cartify_core::{OrderId, OrderStatus, PaymentStatus, Price, ProductId, Role, UserId};

use crate::error::Result;
use crate::middleware::{CurrentUser, authorize};
use crate::models::order::{LineItem, Order};
use crate::services::orders::OrderService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// One requested line item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Order creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub shipping_address: String,
}

/// One line item in a response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Public view of an order with its items.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub customer_id: UserId,
    pub items: Vec<OrderItemResponse>,
    /// Total in minor currency units.
    pub total: Price,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub delivery_partner_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub shipping_address: String,
    pub tracking_number: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
            total: order.total,
            status: order.status,
            payment_status: order.payment_status,
            delivery_partner_id: order.delivery_partner_id,
            created_at: order.created_at,
            shipping_address: order.shipping_address,
            tracking_number: order.tracking_number,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Place an order for the authenticated customer.
///
/// # Errors
///
/// Returns 400 for an empty cart, a non-positive quantity, or an unknown
/// product ID; 401/403 from the guard.
pub async fn create(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>> {
    authorize(&user, &[Role::Customer])?;

    let items: Vec<LineItem> = body
        .items
        .iter()
        .map(|item| LineItem {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();

    let order = OrderService::new(state.pool())
        .place_order(user, &items, body.shipping_address)
        .await?;

    Ok(Json(order.into()))
}

/// List the authenticated customer's orders, newest first.
///
/// # Errors
///
/// Returns 401/403 from the guard.
pub async fn my_orders(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>> {
    authorize(&user, &[Role::Customer])?;

    let orders = OrderService::new(state.pool()).list_my_orders(user).await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
