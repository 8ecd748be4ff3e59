//! Shop management endpoints: profile, inventory, orders, riders,
//! analytics, image upload.

use eazika_core::{
    AddProductPayload, CategoryId, CreateShopPayload, OrderId, OrderStatus, ProductId,
    ProductPrice, RiderId, ShopAnalytics, ShopOrder, ShopOrderDetail, ShopProduct, ShopProfile,
    ShopRider, UpdateProductPayload, UpdateShopPayload, UserId, UserProfile,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::transport::RequestBody;
use crate::http::{ApiClient, HttpRequest, RequestOptions};

/// Raw product form data as collected by the add-product UI, normalized
/// into an [`AddProductPayload`] before dispatch.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub stock: u32,
    pub price: Decimal,
    pub product_category_id: Option<CategoryId>,
    pub global_product_id: Option<ProductId>,
    pub is_global_product: bool,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// `/shops/*` endpoints plus the shared `/upload` and `/products/global`
/// surfaces.
#[derive(Debug, Clone)]
pub struct ShopService {
    client: ApiClient,
}

impl ShopService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // =========================================================================
    // Shop management
    // =========================================================================

    /// `POST /shops/create-shop`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn create_shop(&self, payload: &CreateShopPayload) -> Result<ShopProfile, ApiError> {
        let body = serde_json::to_value(payload)?;
        self.client
            .request(
                HttpRequest::post("/shops/create-shop", body),
                RequestOptions::default(),
            )
            .await
    }

    /// `PUT /shops/update-shop`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn update_shop(&self, payload: &UpdateShopPayload) -> Result<ShopProfile, ApiError> {
        let body = serde_json::to_value(payload)?;
        self.client
            .request(
                HttpRequest::put("/shops/update-shop", body),
                RequestOptions::default(),
            )
            .await
    }

    /// `GET /shops/profile`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_shop_profile(&self) -> Result<ShopProfile, ApiError> {
        self.client
            .request(HttpRequest::get("/shops/profile"), RequestOptions::default())
            .await
    }

    /// `POST /upload` - multipart image upload, returns the hosted URL.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn upload_image(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let mut req = HttpRequest::new(reqwest::Method::POST, "/upload");
        req.body = RequestBody::Multipart {
            field: "file".to_string(),
            file_name: file_name.into(),
            bytes,
        };
        let response: UploadResponse = self.client.request(req, RequestOptions::default()).await?;
        Ok(response.url)
    }

    // =========================================================================
    // Product management
    // =========================================================================

    /// `GET /shops/products` - the shop's own inventory.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_inventory(&self) -> Result<Vec<ShopProduct>, ApiError> {
        self.client
            .request(
                HttpRequest::get("/shops/products"),
                RequestOptions::default(),
            )
            .await
    }

    /// `GET /products/global` - the global catalog.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_global_catalog(&self) -> Result<Vec<ShopProduct>, ApiError> {
        self.client
            .request(
                HttpRequest::get("/products/global"),
                RequestOptions::default(),
            )
            .await
    }

    /// `POST /shops/add-shop-product` - add a product to the inventory.
    ///
    /// UI form data is normalized into the API payload: category defaults
    /// to 1, single price tier with zero discount, 1 kg unit, INR.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn add_product(&self, product: NewProduct) -> Result<(), ApiError> {
        let payload = AddProductPayload {
            product_category_id: product.product_category_id.unwrap_or(CategoryId::new(1)),
            global_product_id: product.global_product_id.unwrap_or(ProductId::new(0)),
            is_global_product: product.is_global_product,
            name: product.name,
            description: product.description,
            images: product.images,
            stock: product.stock,
            prices: vec![ProductPrice {
                id: None,
                price: product.price,
                discount: Decimal::ZERO,
                weight: Decimal::ONE,
                unit: "kg".to_string(),
                currency: "INR".to_string(),
            }],
        };
        let body = serde_json::to_value(&payload)?;
        self.client
            .send(
                HttpRequest::post("/shops/add-shop-product", body),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// `PUT /shops/update-shop-product-stock/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn update_stock(&self, product_id: ProductId, stock: u32) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::put(
                    format!("/shops/update-shop-product-stock/{product_id}"),
                    serde_json::json!({"stock": stock}),
                ),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// `PUT /shops/update-shop-product/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn update_product_details(
        &self,
        product_id: ProductId,
        payload: &UpdateProductPayload,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(payload)?;
        self.client
            .send(
                HttpRequest::put(format!("/shops/update-shop-product/{product_id}"), body),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// `DELETE /shops/products/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::delete(format!("/shops/products/{product_id}")),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Order management
    // =========================================================================

    /// `GET /shops/orders` - list orders, optionally filtered by status.
    /// `None` (the UI's "all" tab) sends no filter.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_shop_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<ShopOrder>, ApiError> {
        let mut req = HttpRequest::get("/shops/orders");
        if let Some(status) = status {
            req = req.query("status", status.to_string());
        }
        self.client.request(req, RequestOptions::default()).await
    }

    /// `GET /shops/orders/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_shop_order(&self, order_id: OrderId) -> Result<ShopOrderDetail, ApiError> {
        self.client
            .request(
                HttpRequest::get(format!("/shops/orders/{order_id}")),
                RequestOptions::default(),
            )
            .await
    }

    /// `PUT /shops/orders/{id}/status`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::put(
                    format!("/shops/orders/{order_id}/status"),
                    serde_json::json!({"status": status}),
                ),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Rider management
    // =========================================================================

    /// `GET /shops/riders`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_shop_riders(&self) -> Result<Vec<ShopRider>, ApiError> {
        self.client
            .request(HttpRequest::get("/shops/riders"), RequestOptions::default())
            .await
    }

    /// `GET /shops/get-user?phone=...` - look up a user to invite as rider.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn search_user_by_phone(&self, phone: &str) -> Result<UserProfile, ApiError> {
        self.client
            .request(
                HttpRequest::get("/shops/get-user").query("phone", phone),
                RequestOptions::default(),
            )
            .await
    }

    /// `PATCH /shops/send-invite-to-delivery`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn send_rider_invite(&self, user_id: UserId) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::patch(
                    "/shops/send-invite-to-delivery",
                    serde_json::json!({"userId": user_id}),
                ),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// `POST /shops/orders/{orderId}/assign`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn assign_rider(&self, order_id: OrderId, rider_id: RiderId) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::post(
                    format!("/shops/orders/{order_id}/assign"),
                    serde_json::json!({"riderId": rider_id}),
                ),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// `DELETE /shops/riders/{riderId}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn remove_rider(&self, rider_id: RiderId) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::delete(format!("/shops/riders/{rider_id}")),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    /// `GET /shops/analytics?range=...`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_analytics(&self, range: &str) -> Result<ShopAnalytics, ApiError> {
        self.client
            .request(
                HttpRequest::get("/shops/analytics").query("range", range),
                RequestOptions::default(),
            )
            .await
    }
}
