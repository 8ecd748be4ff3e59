//! User identity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{AddressId, UserId};

/// Authenticated user identity as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Role string as issued by the server (`user`, `shop`, `admin`, ...).
    pub role: String,
    pub is_active: bool,
    pub is_phone_verified: bool,
    pub is_email_verified: bool,
    #[serde(default)]
    pub default_address_id: Option<AddressId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update sent to `PUT /users/update-profile`.
///
/// All fields are optional; only the set fields are sent. The same struct is
/// merged into the cached identity when the server rejects the update and
/// the client falls back to a local, unconfirmed patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl UpdateProfilePayload {
    /// Apply this partial update on top of an existing identity.
    ///
    /// Used as the degraded fallback when the server rejects the update:
    /// the local copy reflects the user's intent but is not server-confirmed.
    pub fn merge_into(&self, user: &mut User) {
        if let Some(ref name) = self.name {
            user.name.clone_from(name);
        }
        if let Some(ref email) = self.email {
            user.email.clone_from(email);
        }
        if let Some(ref phone) = self.phone {
            user.phone.clone_from(phone);
        }
        if let Some(ref image) = self.image {
            user.image = Some(image.clone());
        }
    }
}
