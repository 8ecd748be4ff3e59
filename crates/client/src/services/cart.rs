//! Cart and order-creation endpoints.

use eazika_core::{AddToCartPayload, CartItem, CartItemId, Order, OrderPayload};
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;
use crate::http::{ApiClient, HttpRequest, RequestOptions};

/// `/cart` and `/orders` endpoints.
#[derive(Debug, Clone)]
pub struct CartService {
    client: ApiClient,
}

impl CartService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /cart` - fetch the server cart.
    ///
    /// Defensive normalization: a payload that is not a JSON array (some
    /// endpoint variants return an object on an empty cart) is coerced to
    /// an empty item list rather than failing.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        let payload: Value = self
            .client
            .request(HttpRequest::get("/cart"), RequestOptions::default())
            .await?;

        match payload {
            Value::Array(_) => Ok(serde_json::from_value(payload)?),
            other => {
                warn!(got = ?other, "cart payload was not an array, coercing to empty");
                Ok(Vec::new())
            }
        }
    }

    /// `POST /cart/add` - add a product to the cart.
    ///
    /// The response does not include the joined product details; callers
    /// re-fetch the cart afterwards.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn add_to_cart(&self, payload: &AddToCartPayload) -> Result<(), ApiError> {
        let body = serde_json::to_value(payload)?;
        self.client
            .send(HttpRequest::post("/cart/add", body), RequestOptions::default())
            .await?;
        Ok(())
    }

    /// `PUT /cart/update/{id}` - set the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn update_cart_item(&self, item_id: CartItemId, quantity: u32) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::put(
                    format!("/cart/update/{item_id}"),
                    serde_json::json!({"quantity": quantity}),
                ),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// `DELETE /cart/remove/{id}` - remove a cart line.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn remove_cart_item(&self, item_id: CartItemId) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::delete(format!("/cart/remove/{item_id}")),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// `DELETE /cart/clear` - empty the cart.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::delete("/cart/clear"),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// `POST /orders/create` - create an order from the current cart.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn create_order(&self, payload: &OrderPayload) -> Result<Order, ApiError> {
        let body = serde_json::to_value(payload)?;
        self.client
            .request(
                HttpRequest::post("/orders/create", body),
                RequestOptions::default(),
            )
            .await
    }
}
