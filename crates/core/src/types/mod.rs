//! Core types for the Eazika client.
//!
//! All request and response models use `#[serde(rename_all = "camelCase")]`
//! to match the API wire format.

pub mod admin;
pub mod cart;
pub mod id;
pub mod shop;
pub mod status;
pub mod user;

pub use admin::*;
pub use cart::*;
pub use id::*;
pub use shop::*;
pub use status::*;
pub use user::*;
