use ff_core::Route;
use serde::Serialize;

use super::confirm;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthVerifyArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct VerifyResponse {
    email: String,
    verified: bool,
    next: String,
}

pub async fn handle(
    args: &AuthVerifyArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let email = args.email.trim();
    confirm(ctx, email, &args.code).await?;
    output(
        &VerifyResponse {
            email: email.to_string(),
            verified: true,
            next: Route::Login.to_string(),
        },
        flags.format,
    )
}
