use ff_client::ClientError;
use ff_core::responses::{Activity, Recommendation, UserStats};
use ff_core::{Route, UserProfile};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::client_error;
use crate::commands::recommendations::RecommendationRow;
use crate::context::AppContext;
use crate::output::{output, output_section};
use crate::progress::Progress;

const TOP_RECOMMENDATIONS: usize = 3;
const LOAD_FALLBACK: &str = "Could not load your dashboard. Please try again.";

#[derive(Serialize)]
struct DashboardResponse {
    user: Option<UserProfile>,
    stats: UserStats,
    activities: Vec<Activity>,
    top_recommendations: Vec<Recommendation>,
}

#[derive(Serialize)]
struct Greeting<'a> {
    user: &'a str,
    email: Option<&'a str>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.enter(Route::Dashboard)?;

    let spinner = Progress::spinner("Loading dashboard...");
    let (stats, activities, report) = tokio::join!(
        ctx.client.user_stats(),
        ctx.client.activities(),
        ctx.client.recommendations(),
    );
    spinner.finish_clear();

    let fail = |error: ClientError| client_error(error, LOAD_FALLBACK);
    let mut top_recommendations = report.map_err(fail)?.recommendations;
    top_recommendations.truncate(TOP_RECOMMENDATIONS);
    let dashboard = DashboardResponse {
        user: ctx.auth.user(),
        stats: stats.map_err(fail)?,
        activities: activities.map_err(fail)?,
        top_recommendations,
    };

    if flags.format != OutputFormat::Table {
        return output(&dashboard, flags.format);
    }

    if let Some(user) = &dashboard.user {
        let greeting = Greeting {
            user: user.display_name(),
            email: user.email.as_deref(),
        };
        output_section("Welcome back", &greeting, OutputFormat::Table)?;
    }
    output_section("Statistics", &dashboard.stats, OutputFormat::Table)?;
    output_section("Recent activity", &dashboard.activities, OutputFormat::Table)?;
    let rows: Vec<RecommendationRow<'_>> =
        dashboard.top_recommendations.iter().map(Into::into).collect();
    output_section("Top recommendations", &rows, OutputFormat::Table)
}
