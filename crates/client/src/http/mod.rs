//! Authenticated HTTP client.
//!
//! Single choke point for all outbound API calls. Responsibilities:
//!
//! - attach the bearer credential from storage to authenticated requests
//! - recover from an expired credential with exactly one refresh-and-retry
//!   cycle per request (401 responses only)
//! - short-circuit a 401 on the logout endpoint into a synthetic success,
//!   so a dead token can never start a refresh loop during logout
//! - tear down the session and report a login navigation intent when the
//!   refresh itself fails (terminal)
//! - classify and log every other failure (`network`, `http-status`,
//!   `request-error`) and propagate it unmodified
//!
//! The refresh endpoint is always called directly on the transport, never
//! through [`ApiClient::send`], which structurally rules out refresh
//! recursion: a request is retried at most once, inline.

pub mod transport;

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::ApiError;
use crate::navigation::{Destination, Navigator};
use crate::storage::{Storage, keys};

pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, RequestBody, Transport};

/// Logout endpoint path; a 401 here resolves as a synthetic success.
pub const LOGOUT_PATH: &str = "/users/logout";
/// Credential refresh endpoint.
pub const REFRESH_PATH: &str = "/users/refresh";

/// Per-request options.
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    /// Attach the bearer credential and participate in the refresh cycle.
    pub requires_auth: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            requires_auth: true,
        }
    }
}

impl RequestOptions {
    /// Options for endpoints that must go out without credentials.
    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self {
            requires_auth: false,
        }
    }
}

/// The authenticated API client. Cheap to clone; clones share the same
/// transport, storage, and navigator.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn Storage>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        storage: Arc<dyn Storage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                transport,
                storage,
                navigator,
            }),
        }
    }

    /// Shared storage backing tokens, cookies, and the persisted session.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.inner.storage)
    }

    /// Shared navigation intent sink.
    #[must_use]
    pub fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.inner.navigator)
    }

    /// Dispatch a request through the authenticated pipeline.
    ///
    /// # Errors
    ///
    /// - `ApiError::Status` for non-success responses (including a 401 that
    ///   survives the refresh cycle)
    /// - `ApiError::RefreshFailed` when the refresh call itself fails; local
    ///   session state has been cleared and a login intent reported
    /// - `ApiError::Network` / `ApiError::Request` from the transport,
    ///   propagated unmodified after logging
    #[instrument(skip(self, req), fields(method = %req.method, path = %req.path))]
    pub async fn send(
        &self,
        mut req: HttpRequest,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        if opts.requires_auth
            && let Some(token) = self.inner.storage.get(keys::ACCESS_TOKEN)
        {
            attach_bearer(&mut req, &token)?;
        }

        let response = match self.inner.transport.dispatch(req.clone()).await {
            Ok(response) => response,
            Err(e) => {
                warn!(class = e.class(), error = %e, "request failed");
                return Err(e);
            }
        };

        if response.status == StatusCode::UNAUTHORIZED {
            return self.recover_unauthorized(req, response).await;
        }

        into_result(response)
    }

    /// Dispatch a request and deserialize the response payload, unwrapping
    /// the `{"data": ...}` envelope when present.
    ///
    /// # Errors
    ///
    /// Everything [`ApiClient::send`] returns, plus `ApiError::Parse` when
    /// the payload does not match `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        req: HttpRequest,
        opts: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.send(req, opts).await?;
        extract_data(response.body)
    }

    /// Handle a 401: synthetic success for logout, otherwise a one-shot
    /// refresh-and-retry. `original` is the 401 response, kept so the
    /// original error can be surfaced when no refresh is possible.
    async fn recover_unauthorized(
        &self,
        mut req: HttpRequest,
        original: HttpResponse,
    ) -> Result<HttpResponse, ApiError> {
        // A 401 on logout means the token is already dead. Resolve as a
        // synthetic success so the caller can clear local state without
        // triggering a refresh loop.
        if req.path.contains("/logout") {
            debug!("401 on logout endpoint, resolving as synthetic success");
            return Ok(HttpResponse {
                status: StatusCode::OK,
                body: serde_json::json!({"success": true}),
            });
        }

        let Some(refresh_token) = self.inner.storage.get(keys::REFRESH_TOKEN) else {
            warn!("401 with no refresh token, surfacing original error");
            return into_result(original);
        };

        let refresh_token = SecretString::from(refresh_token);
        match self.refresh_access_token(&refresh_token).await {
            Ok(access_token) => {
                self.inner
                    .storage
                    .set(keys::ACCESS_TOKEN, access_token.expose_secret())?;
                attach_bearer(&mut req, access_token.expose_secret())?;

                // Exactly one retry; a second 401 propagates below.
                let retried = self.inner.transport.dispatch(req).await.map_err(|e| {
                    warn!(class = e.class(), error = %e, "retried request failed");
                    e
                })?;
                into_result(retried)
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, tearing down session");
                self.teardown_session();
                Err(ApiError::RefreshFailed(e.to_string()))
            }
        }
    }

    /// Call the refresh endpoint directly on the transport, bypassing the
    /// authenticated pipeline.
    async fn refresh_access_token(
        &self,
        refresh_token: &SecretString,
    ) -> Result<SecretString, ApiError> {
        let req = HttpRequest::post(
            REFRESH_PATH,
            serde_json::json!({"refreshToken": refresh_token.expose_secret()}),
        );
        let response = self.inner.transport.dispatch(req).await?;

        if !response.status.is_success() {
            return Err(status_error(&response));
        }

        response
            .body
            .pointer("/data/accessToken")
            .and_then(Value::as_str)
            .map(SecretString::from)
            .ok_or_else(|| {
                ApiError::Request("refresh response missing data.accessToken".to_string())
            })
    }

    /// Terminal refresh failure: clear the stored credential and cached
    /// session, report the login intent.
    fn teardown_session(&self) {
        for key in [keys::ACCESS_TOKEN, keys::SESSION] {
            if let Err(e) = self.inner.storage.remove(key) {
                warn!(error = %e, key, "failed to clear storage during teardown");
            }
        }
        self.inner.navigator.redirect(Destination::Login);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

/// Attach `Authorization: Bearer ...`, merging into the existing header map
/// (other headers are never clobbered).
fn attach_bearer(req: &mut HttpRequest, token: &str) -> Result<(), ApiError> {
    let value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| ApiError::Request(format!("invalid bearer token: {e}")))?;
    req.headers.insert(AUTHORIZATION, value);
    Ok(())
}

/// Convert a response into a result, logging the `http-status` class for
/// error statuses.
fn into_result(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.status.is_success() {
        return Ok(response);
    }
    let err = status_error(&response);
    warn!(class = err.class(), error = %err, "server returned error status");
    Err(err)
}

fn status_error(response: &HttpResponse) -> ApiError {
    let message = response
        .message()
        .map_or_else(
            || {
                response
                    .status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            },
            ToString::to_string,
        );
    ApiError::Status {
        status: response.status,
        message,
    }
}

/// Unwrap the `{"data": ...}` envelope when present; endpoints that return
/// a bare payload deserialize as-is.
fn extract_data<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let payload = match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(payload).map_err(ApiError::from)
}
