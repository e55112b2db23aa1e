//! Client-visible routes. The CLI maps each command onto one of these and
//! resolves it through `ff_auth::guard` before doing any work.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Signup,
    Login,
    WelcomePage,
    Dashboard,
    Test,
    Recommendations,
    NotFound,
}

impl Route {
    pub const ALL: [Self; 8] = [
        Self::Landing,
        Self::Signup,
        Self::Login,
        Self::WelcomePage,
        Self::Dashboard,
        Self::Test,
        Self::Recommendations,
        Self::NotFound,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Signup => "/signup",
            Self::Login => "/login",
            Self::WelcomePage => "/welcome-page",
            Self::Dashboard => "/dashboard",
            Self::Test => "/test",
            Self::Recommendations => "/recommendations",
            Self::NotFound => "/404",
        }
    }

    /// Resolve a path to a route. Anything unrecognised is the catch-all.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL
            .into_iter()
            .find(|route| *route != Self::NotFound && route.path() == normalized)
            .unwrap_or(Self::NotFound)
    }

    /// Routes reachable without a logged-in user.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(
            self,
            Self::Landing | Self::Signup | Self::Login | Self::NotFound
        )
    }

    /// Routes that only make sense once the user has a completed test.
    #[must_use]
    pub const fn requires_completed_test(self) -> bool {
        matches!(self, Self::Dashboard | Self::Recommendations)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
