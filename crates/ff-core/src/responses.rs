//! Typed results for the endpoints the client consumes.
//!
//! Responses are parsed at the HTTP boundary. A body that does not match
//! these shapes fails there instead of leaking half-filled state into the
//! test flow or the dashboard.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::question::Question;

/// Response from `POST /api/start-session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Response from `POST /api/test-questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

/// Acknowledgement from `POST /api/submit-test`. The shape is server-defined,
/// so everything except an optional message is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityProfile {
    #[serde(default)]
    pub personality_profile: String,
    #[serde(default)]
    pub interest_summary: String,
    #[serde(default)]
    pub meta_summary: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Other,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Career,
    Skill,
    Education,
    Certification,
    #[default]
    #[serde(other)]
    Other,
}

fn default_title() -> String {
    String::from("Untitled Career")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, alias = "summary")]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: RecommendationKind,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, alias = "score")]
    pub confidence: f64,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Response from `GET /api/recommendations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsReport {
    #[serde(default)]
    pub profile: PersonalityProfile,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationsReport {
    /// Recommendations bucketed by priority, highest first. Empty buckets are
    /// omitted.
    #[must_use]
    pub fn by_priority(&self) -> Vec<(Priority, Vec<&Recommendation>)> {
        [Priority::High, Priority::Medium, Priority::Low, Priority::Other]
            .into_iter()
            .filter_map(|priority| {
                let bucket: Vec<&Recommendation> = self
                    .recommendations
                    .iter()
                    .filter(|rec| rec.priority == priority)
                    .collect();
                (!bucket.is_empty()).then_some((priority, bucket))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Response from `GET /api/userStats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub tests_taken: u64,
    #[serde(default)]
    pub distinct_career_count: u64,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub time_since_last_test: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub time: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Response from `GET /api/user/activities`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<Activity>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn recommendation_fills_defaults() {
        let rec: Recommendation = serde_json::from_str("{}").expect("parse");
        assert_eq!(rec.title, "Untitled Career");
        assert_eq!(rec.priority, Priority::Other);
        assert_eq!(rec.kind, RecommendationKind::Other);
        assert!(rec.skills.is_empty());
        assert!((rec.confidence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_priority_maps_to_other() {
        let rec: Recommendation =
            serde_json::from_str(r#"{"title":"x","priority":"urgent"}"#).expect("parse");
        assert_eq!(rec.priority, Priority::Other);
    }

    #[test]
    fn by_priority_orders_and_skips_empty_buckets() {
        let report: RecommendationsReport = serde_json::from_str(
            r#"{"recommendations":[
                {"title":"a","priority":"low"},
                {"title":"b","priority":"high"},
                {"title":"c","priority":"low"}
            ]}"#,
        )
        .expect("parse");

        let groups = report.by_priority();
        let summary: Vec<(Priority, Vec<&str>)> = groups
            .iter()
            .map(|(p, recs)| (*p, recs.iter().map(|r| r.title.as_str()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Priority::High, vec!["b"]),
                (Priority::Low, vec!["a", "c"]),
            ]
        );
    }

    #[test]
    fn stats_keep_unknown_fields() {
        let stats: UserStats =
            serde_json::from_str(r#"{"testsTaken":3,"streak":5}"#).expect("parse");
        assert_eq!(stats.tests_taken, 3);
        assert_eq!(stats.extra["streak"], 5);
    }

    #[test]
    fn activities_must_be_an_array() {
        assert!(serde_json::from_str::<ActivitiesResponse>(r#"{"activities":"none"}"#).is_err());
        assert!(serde_json::from_str::<ActivitiesResponse>("{}").is_err());
    }
}
