//! Session store: the single authoritative holder of "who is logged in".
//!
//! A durable subset of the state (`{user, isAuthenticated}`) is persisted
//! under the `user-storage` key and hydrated on construction; loading flags
//! never persist. Credential bytes live in storage under their own keys,
//! not in the persisted session record.

use std::sync::Arc;

use chrono::Utc;
use eazika_core::{AddressId, UpdateProfilePayload, User, UserId};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{instrument, warn};

use crate::cookies::{self, CookieJar};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::navigation::{Destination, Navigator};
use crate::services::UserService;
use crate::storage::{Storage, StorageError, keys};

/// Role recorded when a token is set without an explicit role.
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Default, Clone)]
struct SessionState {
    user: Option<User>,
    is_authenticated: bool,
    is_loading: bool,
}

/// The durable subset. Everything else is ephemeral.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    user: Option<User>,
    is_authenticated: bool,
}

/// Session state container.
pub struct SessionStore {
    users: UserService,
    storage: Arc<dyn Storage>,
    cookies: CookieJar,
    navigator: Arc<dyn Navigator>,
    debug_identity_fallback: bool,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Build a session store sharing the client's storage and navigator,
    /// hydrating the durable subset if one was persisted.
    ///
    /// `debug_identity_fallback` substitutes a stub identity when the
    /// identity fetch fails; development aid only, keep it off in
    /// production.
    #[must_use]
    pub fn new(client: &ApiClient, debug_identity_fallback: bool) -> Self {
        let storage = client.storage();
        let state = hydrate(storage.as_ref());
        Self {
            users: UserService::new(client.clone()),
            cookies: CookieJar::new(Arc::clone(&storage)),
            navigator: client.navigator(),
            storage,
            debug_identity_fallback,
            state: RwLock::new(state),
        }
    }

    /// Current user identity, if any.
    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    /// Record a freshly issued access token with the default `user` role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the token cannot be persisted.
    pub async fn set_auth_token(&self, token: &SecretString) -> Result<(), ApiError> {
        self.set_auth_token_with_role(token, DEFAULT_ROLE).await
    }

    /// Record a freshly issued access token and role: durable token, the
    /// auth cookie pair, and the authenticated flag. Does not set the user
    /// identity; that is `fetch_user`'s job.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the token cannot be persisted.
    pub async fn set_auth_token_with_role(
        &self,
        token: &SecretString,
        role: &str,
    ) -> Result<(), ApiError> {
        self.storage
            .set(keys::ACCESS_TOKEN, token.expose_secret())?;
        self.cookies.set(cookies::ACCESS_TOKEN, token.expose_secret())?;
        self.cookies.set(cookies::USER_ROLE, role)?;

        let mut state = self.state.write().await;
        state.is_authenticated = true;
        persist(self.storage.as_ref(), &state)?;
        Ok(())
    }

    /// Fetch the authenticated identity from the server.
    ///
    /// Without a stored access token this resolves immediately to the
    /// logged-out state and makes no network call.
    ///
    /// # Errors
    ///
    /// Surfaces the identity-fetch error after resetting to logged-out
    /// (unless the debug identity fallback is enabled).
    #[instrument(skip(self))]
    pub async fn fetch_user(&self) -> Result<(), ApiError> {
        self.state.write().await.is_loading = true;
        let result = self.fetch_user_inner().await;
        self.state.write().await.is_loading = false;
        result
    }

    async fn fetch_user_inner(&self) -> Result<(), ApiError> {
        let Some(token) = self.storage.get(keys::ACCESS_TOKEN) else {
            let mut state = self.state.write().await;
            state.user = None;
            state.is_authenticated = false;
            persist(self.storage.as_ref(), &state)?;
            return Ok(());
        };

        // The durable token can outlive the cookie pair; re-mint it so the
        // API middleware sees both.
        if self.cookies.get(cookies::ACCESS_TOKEN).is_none() {
            self.cookies.set(cookies::ACCESS_TOKEN, &token)?;
        }

        match self.users.get_me().await {
            Ok(user) => {
                self.cookies.set(cookies::USER_ROLE, &user.role)?;
                let mut state = self.state.write().await;
                state.user = Some(user);
                state.is_authenticated = true;
                persist(self.storage.as_ref(), &state)?;
                Ok(())
            }
            Err(e) if self.debug_identity_fallback => {
                warn!(error = %e, "identity fetch failed, substituting debug stub identity");
                let mut state = self.state.write().await;
                state.user = Some(debug_stub_user());
                state.is_authenticated = true;
                persist(self.storage.as_ref(), &state)?;
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.user = None;
                state.is_authenticated = false;
                persist(self.storage.as_ref(), &state)?;
                Err(e)
            }
        }
    }

    /// Update the profile. On success the identity is replaced with the
    /// server's copy; on failure the partial update is merged into the
    /// local identity as a degraded, unconfirmed fallback and the error is
    /// surfaced.
    ///
    /// # Errors
    ///
    /// Returns the update error after applying the local fallback.
    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, patch: UpdateProfilePayload) -> Result<(), ApiError> {
        self.state.write().await.is_loading = true;

        let result = match self.users.update_profile(&patch).await {
            Ok(user) => {
                let mut state = self.state.write().await;
                state.user = Some(user);
                persist(self.storage.as_ref(), &state).map_err(ApiError::from)
            }
            Err(e) => {
                warn!(class = e.class(), error = %e, "profile update failed, applying local patch");
                let mut state = self.state.write().await;
                if let Some(user) = state.user.as_mut() {
                    patch.merge_into(user);
                }
                if let Err(persist_err) = persist(self.storage.as_ref(), &state) {
                    warn!(error = %persist_err, "failed to persist patched identity");
                }
                Err(e)
            }
        };

        self.state.write().await.is_loading = false;
        result
    }

    /// Log out: best-effort server call, then unconditional local teardown
    /// and a login navigation intent (unless already on the login surface).
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(e) = self.users.logout().await {
            warn!(class = e.class(), error = %e, "logout API failed, clearing local session anyway");
        }

        for key in [keys::ACCESS_TOKEN, keys::REFRESH_TOKEN, keys::SESSION] {
            if let Err(e) = self.storage.remove(key) {
                warn!(error = %e, key, "failed to clear storage during logout");
            }
        }
        for name in [cookies::ACCESS_TOKEN, cookies::USER_ROLE] {
            if let Err(e) = self.cookies.remove(name) {
                warn!(error = %e, cookie = name, "failed to clear cookie during logout");
            }
        }

        *self.state.write().await = SessionState::default();

        if !self.navigator.is_at(Destination::Login) {
            self.navigator.redirect(Destination::Login);
        }
    }
}

fn hydrate(storage: &dyn Storage) -> SessionState {
    let Some(raw) = storage.get(keys::SESSION) else {
        return SessionState::default();
    };
    match serde_json::from_str::<PersistedSession>(&raw) {
        Ok(persisted) => SessionState {
            user: persisted.user,
            is_authenticated: persisted.is_authenticated,
            is_loading: false,
        },
        Err(e) => {
            warn!(error = %e, "persisted session was malformed, starting logged out");
            SessionState::default()
        }
    }
}

fn persist(storage: &dyn Storage, state: &SessionState) -> Result<(), StorageError> {
    let persisted = PersistedSession {
        user: state.user.clone(),
        is_authenticated: state.is_authenticated,
    };
    let raw = serde_json::to_string(&persisted)?;
    storage.set(keys::SESSION, &raw)
}

/// Deterministic stand-in identity for the debug fallback path.
fn debug_stub_user() -> User {
    User {
        id: UserId::new(1),
        name: "Rafatul Islam".to_string(),
        email: "rafatul@example.com".to_string(),
        phone: "9876543210".to_string(),
        image: None,
        role: DEFAULT_ROLE.to_string(),
        is_active: true,
        is_phone_verified: true,
        is_email_verified: false,
        default_address_id: Some(AddressId::new(1)),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
