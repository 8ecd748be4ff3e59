//! Typed wrappers over the REST endpoint surface.
//!
//! Each service holds a clone of the [`ApiClient`](crate::ApiClient) and
//! exposes one method per endpoint. Services carry no state; all state
//! lives in the stores.

pub mod admin;
pub mod cart;
pub mod shop;
pub mod user;

pub use admin::AdminService;
pub use cart::CartService;
pub use shop::ShopService;
pub use user::UserService;
