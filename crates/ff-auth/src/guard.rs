//! Route guarding: where a request for a route actually lands given the
//! current auth state.

use ff_core::Route;

use crate::reducer::AuthState;

/// Resolve `requested` against `state`.
///
/// - Logged out: public routes pass, everything else goes to `Login`.
/// - Logged in: `Login`/`Signup` go to the user's home route.
/// - `Dashboard`/`Recommendations` additionally need a completed test,
///   otherwise the user lands on `WelcomePage`.
#[must_use]
pub fn guard(requested: Route, state: &AuthState) -> Route {
    if !state.is_logged_in() {
        return if requested.is_public() {
            requested
        } else {
            Route::Login
        };
    }

    match requested {
        Route::Login | Route::Signup => home(state),
        route if route.requires_completed_test() && !state.has_taken_test() => Route::WelcomePage,
        route => route,
    }
}

/// Landing route for a logged-in user.
#[must_use]
pub fn home(state: &AuthState) -> Route {
    if state.has_taken_test() {
        Route::Dashboard
    } else {
        Route::WelcomePage
    }
}

#[cfg(test)]
mod tests {
    use ff_core::{UserProfile, UserRecord};
    use rstest::rstest;

    use super::*;

    fn logged_in(has_taken_test: bool) -> AuthState {
        AuthState {
            user: Some(UserRecord {
                token: "t".into(),
                user: UserProfile {
                    has_taken_test,
                    ..UserProfile::default()
                },
            }),
        }
    }

    #[rstest]
    #[case(Route::Landing, Route::Landing)]
    #[case(Route::Signup, Route::Signup)]
    #[case(Route::Login, Route::Login)]
    #[case(Route::NotFound, Route::NotFound)]
    #[case(Route::WelcomePage, Route::Login)]
    #[case(Route::Test, Route::Login)]
    #[case(Route::Dashboard, Route::Login)]
    #[case(Route::Recommendations, Route::Login)]
    fn logged_out_routes(#[case] requested: Route, #[case] expected: Route) {
        assert_eq!(guard(requested, &AuthState::default()), expected);
    }

    #[rstest]
    #[case(Route::Login, Route::WelcomePage)]
    #[case(Route::Test, Route::Test)]
    #[case(Route::Dashboard, Route::WelcomePage)]
    #[case(Route::Recommendations, Route::WelcomePage)]
    #[case(Route::Landing, Route::Landing)]
    fn logged_in_before_test(#[case] requested: Route, #[case] expected: Route) {
        assert_eq!(guard(requested, &logged_in(false)), expected);
    }

    #[rstest]
    #[case(Route::Signup, Route::Dashboard)]
    #[case(Route::Dashboard, Route::Dashboard)]
    #[case(Route::Recommendations, Route::Recommendations)]
    #[case(Route::Test, Route::Test)]
    fn logged_in_after_test(#[case] requested: Route, #[case] expected: Route) {
        assert_eq!(guard(requested, &logged_in(true)), expected);
    }
}
