//! Cart store: low-latency local mutation with eventual server
//! consistency.
//!
//! Mutations are optimistic: the local item list changes immediately and is
//! rolled back to the exact pre-mutation snapshot if the server rejects the
//! change. The derived fields (`cart_count`, `cart_total`) are recomputed
//! from the item list after every mutation; they are never settable on
//! their own, so they cannot drift.

use eazika_core::{AddToCartPayload, CartItem, CartItemId, Order, OrderPayload};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{instrument, warn};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::services::CartService;

#[derive(Debug, Default, Clone)]
struct CartState {
    items: Vec<CartItem>,
    is_loading: bool,
    cart_count: usize,
    cart_total: Decimal,
}

impl CartState {
    /// Re-derive count and total from the item list. Must be called after
    /// every change to `items`.
    fn recompute(&mut self) {
        self.cart_count = self.items.len();
        self.cart_total = self.items.iter().map(CartItem::line_total).sum();
    }
}

/// Cart state container.
pub struct CartStore {
    carts: CartService,
    state: RwLock<CartState>,
}

impl CartStore {
    #[must_use]
    pub fn new(client: &ApiClient) -> Self {
        Self {
            carts: CartService::new(client.clone()),
            state: RwLock::new(CartState::default()),
        }
    }

    /// Snapshot of the current item list.
    pub async fn items(&self) -> Vec<CartItem> {
        self.state.read().await.items.clone()
    }

    /// Number of lines in the cart.
    pub async fn cart_count(&self) -> usize {
        self.state.read().await.cart_count
    }

    /// Sum of `price x quantity` over all lines.
    pub async fn cart_total(&self) -> Decimal {
        self.state.read().await.cart_total
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    /// Fetch the server cart and replace the local copy.
    ///
    /// Fail-safe: on failure the prior state is left untouched (no silent
    /// reset to empty).
    ///
    /// # Errors
    ///
    /// Propagates the fetch error; local state is unchanged on failure.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) -> Result<(), ApiError> {
        self.state.write().await.is_loading = true;
        let result = self.refresh_items().await;
        if let Err(ref e) = result {
            warn!(class = e.class(), error = %e, "failed to fetch cart, keeping previous state");
        }
        self.state.write().await.is_loading = false;
        result
    }

    /// Add a product, then re-fetch the whole cart: the add response alone
    /// does not carry the server-joined product details (price, name,
    /// image).
    ///
    /// # Errors
    ///
    /// Propagates the add (or follow-up fetch) error; local state is
    /// unchanged when the add itself fails.
    #[instrument(skip(self, payload))]
    pub async fn add_to_cart(&self, payload: &AddToCartPayload) -> Result<(), ApiError> {
        self.state.write().await.is_loading = true;
        let result = match self.carts.add_to_cart(payload).await {
            Ok(()) => self.refresh_items().await,
            Err(e) => {
                warn!(class = e.class(), error = %e, "failed to add to cart");
                Err(e)
            }
        };
        self.state.write().await.is_loading = false;
        result
    }

    /// Optimistically remove a line; full rollback on server failure.
    ///
    /// # Errors
    ///
    /// Propagates the server error after restoring the pre-mutation state.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, item_id: CartItemId) -> Result<(), ApiError> {
        let previous = {
            let mut state = self.state.write().await;
            let previous = state.items.clone();
            state.items.retain(|item| item.id != item_id);
            state.recompute();
            previous
        };

        match self.carts.remove_cart_item(item_id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(class = e.class(), error = %e, "failed to remove item, rolling back");
                self.restore(previous).await;
                Err(e)
            }
        }
    }

    /// Optimistically set a line's quantity; rollback on server failure.
    ///
    /// A quantity below 1 is a no-op: state is unchanged and no network
    /// call is issued.
    ///
    /// # Errors
    ///
    /// Propagates the server error after restoring the pre-mutation state.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        if quantity < 1 {
            return Ok(());
        }

        let previous = {
            let mut state = self.state.write().await;
            let previous = state.items.clone();
            for item in &mut state.items {
                if item.id == item_id {
                    item.quantity = quantity;
                }
            }
            // a quantity change moves the total but not the line count
            state.recompute();
            previous
        };

        match self.carts.update_cart_item(item_id, quantity).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(class = e.class(), error = %e, "failed to update quantity, rolling back");
                self.restore(previous).await;
                Err(e)
            }
        }
    }

    /// Optimistically empty the cart; rollback on server failure.
    ///
    /// # Errors
    ///
    /// Propagates the server error after restoring the pre-mutation state.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        let previous = {
            let mut state = self.state.write().await;
            let previous = std::mem::take(&mut state.items);
            state.recompute();
            previous
        };

        match self.carts.clear_cart().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(class = e.class(), error = %e, "failed to clear cart, rolling back");
                self.restore(previous).await;
                Err(e)
            }
        }
    }

    /// Create an order from the cart. On success the server has consumed
    /// the cart, so the local copy resets to empty.
    ///
    /// # Errors
    ///
    /// Propagates the order-creation error; the cart is left as-is.
    #[instrument(skip(self, payload))]
    pub async fn place_order(&self, payload: &OrderPayload) -> Result<Order, ApiError> {
        self.state.write().await.is_loading = true;

        let result = self.carts.create_order(payload).await;
        match &result {
            Ok(_) => {
                let mut state = self.state.write().await;
                state.items.clear();
                state.recompute();
            }
            Err(e) => {
                warn!(class = e.class(), error = %e, "failed to place order");
            }
        }

        self.state.write().await.is_loading = false;
        result
    }

    async fn refresh_items(&self) -> Result<(), ApiError> {
        let items = self.carts.get_cart().await?;
        let mut state = self.state.write().await;
        state.items = items;
        state.recompute();
        Ok(())
    }

    async fn restore(&self, previous: Vec<CartItem>) {
        let mut state = self.state.write().await;
        state.items = previous;
        state.recompute();
    }
}
