//! Auth cookie pair.
//!
//! The API's middleware expects a small cookie pair (`accessToken`,
//! `userRole`) alongside the bearer header. Cookies here are records in the
//! storage seam with a fixed expiry window and path scope; expired records
//! read as absent and are pruned on access.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{Storage, StorageError};

/// Cookie holding the access token.
pub const ACCESS_TOKEN: &str = "accessToken";
/// Cookie holding the user's role string.
pub const USER_ROLE: &str = "userRole";

/// Fixed cookie lifetime.
pub const COOKIE_TTL_DAYS: i64 = 7;
/// Fixed cookie path scope.
pub const COOKIE_PATH: &str = "/";

const KEY_PREFIX: &str = "cookie:";

/// A stored cookie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub value: String,
    pub path: String,
    pub expires_at: DateTime<Utc>,
}

impl Cookie {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Cookie jar over the storage seam.
#[derive(Clone)]
pub struct CookieJar {
    storage: Arc<dyn Storage>,
}

impl CookieJar {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Set a cookie with the fixed 7-day expiry and `/` path.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be persisted.
    pub fn set(&self, name: &str, value: &str) -> Result<(), StorageError> {
        let cookie = Cookie {
            value: value.to_string(),
            path: COOKIE_PATH.to_string(),
            expires_at: Utc::now() + Duration::days(COOKIE_TTL_DAYS),
        };
        let raw = serde_json::to_string(&cookie)?;
        self.storage.set(&storage_key(name), &raw)
    }

    /// Read a cookie value. Expired or malformed records read as absent and
    /// are pruned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        let key = storage_key(name);
        let raw = self.storage.get(&key)?;
        match serde_json::from_str::<Cookie>(&raw) {
            Ok(cookie) if !cookie.is_expired(Utc::now()) => Some(cookie.value),
            Ok(_) | Err(_) => {
                if let Err(e) = self.storage.remove(&key) {
                    warn!(error = %e, cookie = name, "failed to prune stale cookie");
                }
                None
            }
        }
    }

    /// Remove a cookie. Removing an absent cookie is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the removal cannot be persisted.
    pub fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.storage.remove(&storage_key(name))
    }
}

fn storage_key(name: &str) -> String {
    format!("{KEY_PREFIX}{name}")
}
