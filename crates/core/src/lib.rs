//! Eazika Core - Shared types library.
//!
//! This crate provides the domain types shared across the Eazika client
//! components:
//! - `client` - API client, session and cart state containers
//! - `integration-tests` - Scenario tests for the client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no state.
//! Everything here mirrors the JSON wire format of the Eazika API
//! (`/api/v2`), which uses camelCase field names, numeric entity IDs, and
//! ISO 8601 timestamps.
//!
//! # Modules
//!
//! - [`types`] - Domain models for users, carts, shops, orders, and riders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
