use ff_core::Route;

use crate::cli::GlobalFlags;
use crate::commands::client_error;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.enter(Route::Dashboard)?;

    let spinner = Progress::spinner("Loading activity...");
    let activities = ctx.client.activities().await;
    spinner.finish_clear();
    let activities =
        activities.map_err(|error| client_error(error, "Could not load your activity."))?;

    output(&activities, flags.format)
}
