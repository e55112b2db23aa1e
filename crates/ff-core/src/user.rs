//! Persisted user record and the profile fields the client reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile fields of the logged-in user. Fields the client does not model are
/// preserved in `extra` so a round-trip through storage loses nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub has_taken_test: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Shallow-merge a patch into this profile. Absent patch fields keep the
    /// current value.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username {
            self.username = Some(username);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(role) = patch.role {
            self.role = Some(role);
        }
        if let Some(taken) = patch.has_taken_test {
            self.has_taken_test = taken;
        }
        self.extra.extend(patch.extra);
    }

    /// Best display name: username, then email, then id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("anonymous")
    }
}

/// Partial profile update carried by the `UPDATE_USER` transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub has_taken_test: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The single persisted record whose presence means "logged in".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub token: String,
    #[serde(default)]
    pub user: UserProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Response from the `/auth/*` endpoints and `GET /auth/current-user`.
///
/// Accepts both the flat `{ token, user }` shape and the nested
/// `{ data: { token, user } }` shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub data: Option<AuthData>,
    #[serde(default)]
    pub requires_verification: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    /// Build the record to persist. `None` when the response carries no token.
    #[must_use]
    pub fn to_record(&self) -> Option<UserRecord> {
        let nested = self.data.as_ref();
        let token = nested
            .and_then(|data| data.token.clone())
            .or_else(|| self.token.clone())
            .filter(|token| !token.is_empty())?;
        let user = nested
            .and_then(|data| data.user.clone())
            .or_else(|| self.user.clone())
            .unwrap_or_default();
        Some(UserRecord { token, user })
    }
}
