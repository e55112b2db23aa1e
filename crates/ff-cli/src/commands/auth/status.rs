use ff_auth::expiry::decode_expiry;
use ff_auth::guard::home;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    username: Option<String>,
    email: Option<String>,
    has_taken_test: bool,
    home: Option<String>,
    expires_at: Option<String>,
    token_source: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let state = ctx.auth.state();
    let user = ctx.auth.user();

    let status = AuthStatusResponse {
        authenticated: state.is_logged_in(),
        username: user.as_ref().and_then(|u| u.username.clone()),
        email: user.as_ref().and_then(|u| u.email.clone()),
        has_taken_test: state.has_taken_test(),
        home: state.is_logged_in().then(|| home(&state).to_string()),
        expires_at: state
            .token()
            .and_then(|token| decode_expiry(token).ok())
            .map(|at| at.to_rfc3339()),
        token_source: ctx.auth.token_source(),
    };

    output(&status, flags.format)
}
