use clap::{Args, Subcommand};

use crate::cli::subcommands::AuthCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign up, verify, log in and out.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Take the aptitude test.
    Test,
    /// Career recommendations from your latest test.
    Recommendations(RecommendationsArgs),
    /// Usage statistics.
    Stats,
    /// Recent activity.
    Activities,
    /// Profile, statistics, activity and top recommendations together.
    Dashboard,
    /// Show where a client route would take you right now.
    Route(RouteArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RecommendationsArgs {
    /// Group recommendations by priority.
    #[arg(long)]
    pub group: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RouteArgs {
    /// Client path, e.g. /dashboard
    pub path: String,
}
