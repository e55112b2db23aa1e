//! Auth state transitions.
//!
//! ```text
//! logged_out ──Login──▶ logged_in ──UpdateUser──▶ logged_in
//!      ▲                    │
//!      └──────Logout────────┘
//! ```
//!
//! [`reduce`] is pure. Persisting the result is the caller's job, see
//! [`crate::AuthContext::save`].

use ff_core::{UserPatch, UserRecord};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserRecord>,
}

impl AuthState {
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().map(|record| record.token.as_str())
    }

    #[must_use]
    pub fn has_taken_test(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|record| record.user.has_taken_test)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Login(UserRecord),
    Logout,
    UpdateUser(UserPatch),
}

impl AuthAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login(_) => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::UpdateUser(_) => "UPDATE_USER",
        }
    }
}

/// Apply one transition. `UpdateUser` with nobody logged in leaves the state
/// unchanged.
#[must_use]
pub fn reduce(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::Login(record) => AuthState { user: Some(record) },
        AuthAction::Logout => AuthState { user: None },
        AuthAction::UpdateUser(patch) => match state.user {
            Some(mut record) => {
                record.user.apply(patch);
                AuthState { user: Some(record) }
            }
            None => state,
        },
    }
}
