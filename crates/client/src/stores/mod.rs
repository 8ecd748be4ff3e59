//! Client-side state containers.
//!
//! Stores are explicit, injectable containers (no globals): they are
//! constructed from an [`ApiClient`](crate::ApiClient) and own their state
//! behind an async lock. Store actions are ordinary async methods; the UI
//! layer is responsible for debouncing duplicate triggers while
//! `is_loading` is set; overlapping mutations of the same entity resolve
//! last-write-wins.

pub mod cart;
pub mod session;

pub use cart::CartStore;
pub use session::SessionStore;
