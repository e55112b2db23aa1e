use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    logged_out: bool,
    was_authenticated: bool,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let was_authenticated = ctx.auth.is_authenticated();
    ctx.auth.logout()?;
    output(
        &LogoutResponse {
            logged_out: true,
            was_authenticated,
        },
        flags.format,
    )
}
