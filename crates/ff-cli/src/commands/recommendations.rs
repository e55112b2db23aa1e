use ff_core::Route;
use ff_core::responses::{Priority, Recommendation, RecommendationsReport};
use serde::Serialize;

use crate::cli::root_commands::RecommendationsArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::client_error;
use crate::context::AppContext;
use crate::output::{output, output_section};
use crate::progress::Progress;

const LOAD_FALLBACK: &str = "Could not load recommendations. Please try again.";

/// One table row per recommendation; the long text stays in JSON output.
#[derive(Serialize)]
pub(crate) struct RecommendationRow<'a> {
    title: &'a str,
    #[serde(rename = "type")]
    kind: ff_core::responses::RecommendationKind,
    priority: Priority,
    confidence: f64,
    timeframe: &'a str,
    skills: &'a [String],
}

impl<'a> From<&'a Recommendation> for RecommendationRow<'a> {
    fn from(rec: &'a Recommendation) -> Self {
        Self {
            title: &rec.title,
            kind: rec.kind,
            priority: rec.priority,
            confidence: rec.confidence,
            timeframe: &rec.timeframe,
            skills: &rec.skills,
        }
    }
}

#[derive(Serialize)]
struct PriorityGroup<'a> {
    priority: Priority,
    recommendations: Vec<&'a Recommendation>,
}

#[derive(Serialize)]
struct GroupedReport<'a> {
    profile: &'a ff_core::responses::PersonalityProfile,
    completed_at: Option<String>,
    groups: Vec<PriorityGroup<'a>>,
}

pub async fn handle(
    args: &RecommendationsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.enter(Route::Recommendations)?;

    let spinner = Progress::spinner("Loading recommendations...");
    let report = match ctx.client.recommendations().await {
        Ok(report) => {
            spinner.finish_clear();
            report
        }
        Err(error) => {
            spinner.finish_err("failed to load recommendations");
            return Err(client_error(error, LOAD_FALLBACK));
        }
    };

    match (flags.format, args.group) {
        (OutputFormat::Table, group) => print_table(&report, group),
        (format, true) => output(&grouped(&report), format),
        (format, false) => output(&report, format),
    }
}

fn grouped(report: &RecommendationsReport) -> GroupedReport<'_> {
    GroupedReport {
        profile: &report.profile,
        completed_at: report.completed_at.map(|at| at.to_rfc3339()),
        groups: report
            .by_priority()
            .into_iter()
            .map(|(priority, recommendations)| PriorityGroup {
                priority,
                recommendations,
            })
            .collect(),
    }
}

fn print_table(report: &RecommendationsReport, group: bool) -> anyhow::Result<()> {
    output_section("Your profile", &report.profile, OutputFormat::Table)?;
    if group {
        for (priority, bucket) in report.by_priority() {
            let rows: Vec<RecommendationRow<'_>> = bucket.into_iter().map(Into::into).collect();
            output_section(
                &format!("{} priority", capitalize(priority.as_str())),
                &rows,
                OutputFormat::Table,
            )?;
        }
        return Ok(());
    }
    let rows: Vec<RecommendationRow<'_>> = report.recommendations.iter().map(Into::into).collect();
    output_section("Recommendations", &rows, OutputFormat::Table)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
