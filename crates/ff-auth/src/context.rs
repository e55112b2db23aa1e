use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use ff_core::{Route, UserPatch, UserProfile, UserRecord};

use crate::error::AuthError;
use crate::reducer::{AuthAction, AuthState, reduce};
use crate::store::UserStore;

/// Shared auth service: the current [`AuthState`] plus the store it is
/// mirrored to.
///
/// Transitions go through [`AuthContext::dispatch`] and are never persisted
/// implicitly. Call [`AuthContext::save`] (or the `login` / `logout`
/// helpers, which do both) to write the state out.
pub struct AuthContext {
    state: RwLock<AuthState>,
    store: Arc<dyn UserStore>,
    invalidated: AtomicBool,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("logged_in", &self.is_authenticated())
            .field("invalidated", &self.invalidated.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl AuthContext {
    /// Start from whatever the store holds. An unreadable store starts logged
    /// out.
    #[must_use]
    pub fn hydrate(store: Arc<dyn UserStore>) -> Self {
        let user = match store.load() {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!(%error, "could not read stored user; starting logged out");
                None
            }
        };
        Self::new(store, AuthState { user })
    }

    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, state: AuthState) -> Self {
        Self {
            state: RwLock::new(state),
            store,
            invalidated: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token()
            .map(str::to_string)
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .as_ref()
            .map(|record| record.user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_logged_in()
    }

    /// Name of the storage tier the persisted record came from.
    #[must_use]
    pub fn token_source(&self) -> Option<String> {
        self.store.source()
    }

    /// Apply a transition in memory and return the new state.
    pub fn dispatch(&self, action: AuthAction) -> AuthState {
        tracing::debug!(action = action.as_str(), "auth transition");
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let next = reduce(std::mem::take(&mut *guard), action);
        *guard = next.clone();
        next
    }

    /// Mirror the current state to the store.
    ///
    /// # Errors
    ///
    /// Propagates the store's error.
    pub fn save(&self) -> Result<(), AuthError> {
        match self.state().user {
            Some(record) => self.store.save(&record),
            None => self.store.clear(),
        }
    }

    /// `LOGIN` then save. Re-arms 401 invalidation.
    ///
    /// # Errors
    ///
    /// Propagates the store's error.
    pub fn login(&self, record: UserRecord) -> Result<(), AuthError> {
        self.dispatch(AuthAction::Login(record));
        self.invalidated.store(false, Ordering::SeqCst);
        self.save()
    }

    /// `LOGOUT` then save.
    ///
    /// # Errors
    ///
    /// Propagates the store's error.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.dispatch(AuthAction::Logout);
        self.save()
    }

    /// `UPDATE_USER` then save.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when nobody is logged in.
    pub fn update_user(&self, patch: UserPatch) -> Result<(), AuthError> {
        if !self.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        self.dispatch(AuthAction::UpdateUser(patch));
        self.save()
    }

    /// Handle a 401 from the server: log out, clear stored credentials and
    /// flag a redirect to the login route.
    ///
    /// Credentials are cleared at most once until the next [`Self::login`];
    /// returns `true` for the call that did it.
    pub fn invalidate(&self) -> bool {
        if self.invalidated.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.dispatch(AuthAction::Logout);
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "failed to clear stored credentials after 401");
        }
        tracing::warn!("session rejected by server; credentials cleared, redirecting to login");
        true
    }

    /// Where the user must be sent after an invalidation, if anywhere.
    #[must_use]
    pub fn pending_redirect(&self) -> Option<Route> {
        self.invalidated
            .load(Ordering::SeqCst)
            .then_some(Route::Login)
    }
}
