//! User profile endpoints.

use eazika_core::{UpdateProfilePayload, User};

use crate::error::ApiError;
use crate::http::{ApiClient, HttpRequest, LOGOUT_PATH, RequestOptions};

/// `/users/*` endpoints. Credential refresh is not here; it belongs to the
/// HTTP client's recovery pipeline.
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /users/me` - fetch the authenticated identity.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.client
            .request(HttpRequest::get("/users/me"), RequestOptions::default())
            .await
    }

    /// `PUT /users/update-profile` - update the profile, returning the
    /// server's authoritative copy.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn update_profile(&self, payload: &UpdateProfilePayload) -> Result<User, ApiError> {
        let body = serde_json::to_value(payload)?;
        self.client
            .request(
                HttpRequest::put("/users/update-profile", body),
                RequestOptions::default(),
            )
            .await
    }

    /// `POST /users/logout` - invalidate the server-side session.
    ///
    /// A 401 here resolves as a synthetic success inside the HTTP client,
    /// so logout with an already-dead token still succeeds locally.
    ///
    /// # Errors
    ///
    /// Propagates non-auth [`ApiError`]s; callers treat them as best-effort.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client
            .send(
                HttpRequest::post(LOGOUT_PATH, serde_json::json!({})),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }
}
