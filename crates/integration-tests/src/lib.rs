//! Integration tests for the Eazika client.
//!
//! The client's side effects all sit behind traits, so these tests drive
//! the refresh pipeline and the stores end-to-end with scripted doubles:
//!
//! - [`StubTransport`] - returns a scripted queue of responses and records
//!   every dispatched request
//! - [`RecordingNavigator`] - captures navigation intents and fakes the
//!   current location
//! - `MemoryStorage` (from the client crate) - stands in for durable
//!   storage
//!
//! # Test Categories
//!
//! - `auth_refresh` - 401 recovery, single-retry budget, logout special
//!   case, terminal refresh failure
//! - `cart_store` - optimistic mutations, rollback fidelity, derived-field
//!   recomputation
//! - `session_store` - identity fetch, durable-subset persistence, logout
//!   teardown

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use eazika_client::http::{HttpRequest, HttpResponse, Transport};
use eazika_client::navigation::{Destination, Navigator};
use eazika_client::storage::MemoryStorage;
use eazika_client::{ApiClient, ApiError};
use reqwest::StatusCode;
use serde_json::Value;

/// Transport double: pops responses from a scripted queue, records every
/// request it sees. An exhausted queue fails the dispatch loudly.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Script a JSON response with the given status.
    pub fn push_json(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(HttpResponse { status, body }));
    }

    /// Script a transport-level network failure (no response received).
    pub fn push_network_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(ApiError::Network(message.to_string())));
    }

    /// Every request dispatched so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of dispatches seen.
    #[must_use]
    pub fn dispatch_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn dispatch(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Request("stub transport exhausted".to_string())))
    }
}

/// Navigator double: records redirect intents and fakes "am I on the login
/// surface already".
#[derive(Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<Destination>>,
    at_login: AtomicBool,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_at_login(&self, at_login: bool) {
        self.at_login.store(at_login, Ordering::SeqCst);
    }

    #[must_use]
    pub fn redirects(&self) -> Vec<Destination> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, dest: Destination) {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(dest);
    }

    fn is_at(&self, dest: Destination) -> bool {
        dest == Destination::Login && self.at_login.load(Ordering::SeqCst)
    }
}

/// Fully wired client over test doubles.
pub struct TestContext {
    pub transport: Arc<StubTransport>,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub client: ApiClient,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let transport = StubTransport::new();
        let storage = Arc::new(MemoryStorage::new());
        let navigator = RecordingNavigator::new();
        let client = ApiClient::new(
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::clone(&storage) as Arc<dyn eazika_client::Storage>,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        );
        Self {
            transport,
            storage,
            navigator,
            client,
        }
    }

    /// Context with credentials already in durable storage.
    #[must_use]
    pub fn with_tokens(access: &str, refresh: Option<&str>) -> Self {
        use eazika_client::storage::{Storage, keys};

        let ctx = Self::new();
        ctx.storage
            .set(keys::ACCESS_TOKEN, access)
            .expect("memory storage never fails");
        if let Some(refresh) = refresh {
            ctx.storage
                .set(keys::REFRESH_TOKEN, refresh)
                .expect("memory storage never fails");
        }
        ctx
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
