//! Endpoint paths, relative to the configured base URL.

pub const START_SESSION: &str = "/api/start-session";
pub const TEST_QUESTIONS: &str = "/api/test-questions";
pub const SUBMIT_TEST: &str = "/api/submit-test";
pub const RECOMMENDATIONS: &str = "/api/recommendations";
pub const USER_STATS: &str = "/api/userStats";
pub const USER_ACTIVITIES: &str = "/api/user/activities";

pub const LOGIN: &str = "/auth/login";
pub const SIGNUP: &str = "/auth/signup";
pub const CONFIRM_CODE: &str = "/auth/confirm-code";
pub const RESEND_CODE: &str = "/auth/resend-code";
pub const CURRENT_USER: &str = "/auth/current-user";

/// Routes sent without a bearer token.
pub const PUBLIC_ROUTES: [&str; 4] = [LOGIN, SIGNUP, CONFIRM_CODE, RESEND_CODE];

/// Whether a request to `path` must carry a bearer token.
#[must_use]
pub fn requires_auth(path: &str) -> bool {
    !PUBLIC_ROUTES.contains(&path)
}
