//! Eazika API client library.
//!
//! This crate is the engineering core of the Eazika shop client: everything
//! the UI layer needs to talk to the Eazika API (`{server origin}/api/v2`)
//! and to hold client-side state between requests.
//!
//! # Architecture
//!
//! - [`http`] - The authenticated HTTP client. Single choke point for all
//!   outbound requests: attaches bearer credentials, recovers from expired
//!   tokens with exactly one refresh-and-retry cycle, and classifies
//!   failures (`network`, `http-status`, `request-error`).
//! - [`stores`] - Injectable state containers: the session store (who is
//!   logged in, with a durable persisted subset) and the cart store
//!   (optimistic mutations with rollback on server failure).
//! - [`services`] - Typed wrappers over the REST endpoint surface (user,
//!   cart, shop, admin).
//! - [`storage`] - Key-value storage seam standing in for the browser's
//!   durable storage; memory and file backends provided.
//! - [`navigation`] - Navigation intents. The client never redirects by
//!   itself; it reports a [`navigation::Destination`] for the hosting shell
//!   to act on.
//!
//! # Testing
//!
//! All side-effectful collaborators sit behind traits ([`http::Transport`],
//! [`storage::Storage`], [`navigation::Navigator`]), so the refresh pipeline
//! and both stores can be driven end-to-end with scripted test doubles and
//! no live server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod cookies;
pub mod error;
pub mod http;
pub mod navigation;
pub mod services;
pub mod storage;
pub mod stores;

pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{ApiClient, HttpRequest, HttpResponse, RequestOptions, Transport};
pub use navigation::{Destination, Navigator, NoopNavigator};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use stores::{CartStore, SessionStore};
