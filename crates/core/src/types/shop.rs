//! Shop-side models: profile, inventory, orders, riders, analytics.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, OrderId, ProductId, RiderId, ShopId, UserId};
use super::status::{OrderStatus, RiderStatus};

/// Bank account details captured during shop onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetail {
    pub account_holder_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub branch_name: String,
    pub bank_passbook_image: String,
}

/// Compliance document images uploaded during shop onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopDocuments {
    pub aadhar_image: String,
    pub electricity_bill_image: String,
    pub business_certificate_image: String,
    pub pan_image: String,
}

/// Request body for `POST /shops/create-shop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShopPayload {
    pub shop_name: String,
    pub shop_category: String,
    pub shop_image: Vec<String>,
    pub fssai_number: String,
    pub gst_number: String,
    pub bank_detail: BankDetail,
    pub documents: ShopDocuments,
}

/// Partial shop update for `PUT /shops/update-shop`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShopPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_image: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fssai_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
}

/// Shop profile as returned by `GET /shops/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProfile {
    pub id: ShopId,
    pub user_id: UserId,
    pub shop_name: String,
    pub shop_category: String,
    pub shop_image: Vec<String>,
    pub fssai_number: String,
    pub gst_number: String,
    pub bank_detail: BankDetail,
    pub documents: ShopDocuments,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A price variant of a shop product (weight/unit tier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPrice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub price: Decimal,
    pub discount: Decimal,
    pub weight: Decimal,
    pub unit: String,
    pub currency: String,
}

/// Request body for `POST /shops/add-shop-product`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductPayload {
    pub product_category_id: CategoryId,
    /// Zero when the product is shop-specific rather than catalog-backed.
    pub global_product_id: ProductId,
    pub is_global_product: bool,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub stock: u32,
    pub prices: Vec<ProductPrice>,
}

/// Partial product update for `PUT /shops/update-shop-product/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// A product in the shop's inventory or the global catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub stock: u32,
    pub is_active: bool,
    pub is_global: bool,
    pub category: String,
    /// Headline price, derived from the first entry of `prices`.
    pub price: Decimal,
    #[serde(default)]
    pub prices: Option<Vec<ProductPrice>>,
}

/// Order summary row for the shop order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOrder {
    pub id: OrderId,
    pub customer_name: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub item_count: u32,
    pub created_at: DateTime<Utc>,
    pub payment_method: String,
}

/// A product line within an order detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub image: String,
}

/// Delivery rider assigned to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedDriver {
    pub id: RiderId,
    pub name: String,
    pub phone: String,
}

/// Full order detail as returned by `GET /shops/orders/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOrderDetail {
    #[serde(flatten)]
    pub order: ShopOrder,
    pub customer_id: UserId,
    pub customer_phone: String,
    pub address: String,
    pub products: Vec<OrderProduct>,
    #[serde(default)]
    pub driver: Option<AssignedDriver>,
}

/// A rider attached to the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopRider {
    pub id: RiderId,
    pub name: String,
    pub phone: String,
    pub status: RiderStatus,
    pub active_orders: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub total_deliveries: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Minimal user profile returned by the rider search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub image: String,
    pub role: String,
}

/// Aggregated shop analytics for a time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopAnalytics {
    pub total_orders: u32,
    pub total_revenue: Decimal,
    pub average_order_value: Decimal,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
}

/// A best-selling product row within analytics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub id: ProductId,
    pub name: String,
    pub units_sold: u32,
}
