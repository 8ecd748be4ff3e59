//! Cart and order models.
//!
//! The server is the source of truth for cart contents; the client holds a
//! cached copy between fetches. Derived cart figures (count, total) are
//! always recomputed from the item list, never stored independently.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{AddressId, CartItemId, OrderId, ProductId};
use super::status::OrderStatus;

/// Product details joined into a cart line by the server.
///
/// The add-to-cart response alone does not include these; they appear after
/// a full cart fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
}

/// A single line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub quantity: u32,
    #[serde(default)]
    pub product_details: Option<ProductDetails>,
}

impl CartItem {
    /// Price contribution of this line: `price x quantity`.
    ///
    /// Lines whose product details have not been populated yet count as
    /// zero, matching the server-join semantics of the cart endpoint.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        let price = self
            .product_details
            .as_ref()
            .map_or_else(Decimal::default, |d| d.price);
        price * Decimal::from(self.quantity)
    }
}

/// Request body for adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartPayload {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Request body for creating an order from the current cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub address_id: AddressId,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A created order as returned by the order-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}
