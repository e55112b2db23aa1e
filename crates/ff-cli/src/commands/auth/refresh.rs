use ff_core::Route;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::client_error;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct RefreshResponse {
    username: Option<String>,
    email: Option<String>,
    role: Option<String>,
    has_taken_test: bool,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.enter(Route::WelcomePage)?;

    let spinner = Progress::spinner("Loading profile...");
    let record = match ctx.client.refresh_user().await {
        Ok(record) => {
            spinner.finish_clear();
            record
        }
        Err(error) => {
            spinner.finish_err("refresh failed");
            return Err(client_error(error, "Could not load your profile."));
        }
    };

    output(
        &RefreshResponse {
            username: record.user.username,
            email: record.user.email,
            role: record.user.role,
            has_taken_test: record.user.has_taken_test,
        },
        flags.format,
    )
}
