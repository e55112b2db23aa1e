use ff_auth::guard;
use ff_core::Route;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RouteArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct RouteResponse {
    requested: String,
    resolved: String,
    lands_on: String,
    allowed: bool,
}

pub fn handle(args: &RouteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let requested = Route::from_path(&args.path);
    let lands_on = guard(requested, &ctx.auth.state());
    output(
        &RouteResponse {
            requested: args.path.clone(),
            resolved: requested.to_string(),
            lands_on: lands_on.to_string(),
            allowed: lands_on == requested,
        },
        flags.format,
    )
}
