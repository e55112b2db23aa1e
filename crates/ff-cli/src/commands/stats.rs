use ff_core::Route;

use crate::cli::GlobalFlags;
use crate::commands::client_error;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.enter(Route::Dashboard)?;

    let spinner = Progress::spinner("Loading statistics...");
    let stats = ctx.client.user_stats().await;
    spinner.finish_clear();
    let stats = stats.map_err(|error| client_error(error, "Could not load your statistics."))?;

    output(&stats, flags.format)
}
