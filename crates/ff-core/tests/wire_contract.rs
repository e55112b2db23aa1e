//! Parses representative server bodies for every endpoint in the API table.

use ff_core::responses::{
    ActivitiesResponse, Priority, QuestionsResponse, RecommendationsReport, StartSessionResponse,
    SubmitAck,
};
use ff_core::user::AuthResponse;
use ff_core::{QuestionId, QuestionKind};
use pretty_assertions::assert_eq;

#[test]
fn start_session_body() {
    let resp: StartSessionResponse =
        serde_json::from_str(r#"{"sessionId":"sess_42","startedAt":"now"}"#).expect("parse");
    assert_eq!(resp.session_id, "sess_42");
}

#[test]
fn test_questions_body() {
    let resp: QuestionsResponse = serde_json::from_str(
        r#"{"questions":[
            {"id":1,"question_text":"Favourite subject?","type":"single","options":["Math","Art"]},
            {"id":"q2","question_text":"Hobbies?","type":"multiple","options":["Chess","Hiking","Music"]}
        ]}"#,
    )
    .expect("parse");

    assert_eq!(resp.questions.len(), 2);
    assert_eq!(resp.questions[0].id, QuestionId::Number(1));
    assert_eq!(resp.questions[1].id, QuestionId::Text("q2".into()));
    assert_eq!(resp.questions[1].kind, QuestionKind::Multiple);
    assert_eq!(resp.questions[1].option(2), Some("Music"));
}

#[test]
fn test_questions_without_array_is_rejected() {
    assert!(serde_json::from_str::<QuestionsResponse>(r#"{"questions":{}}"#).is_err());
    assert!(serde_json::from_str::<QuestionsResponse>(r#"{"items":[]}"#).is_err());
}

#[test]
fn submit_ack_keeps_server_fields() {
    let ack: SubmitAck =
        serde_json::from_str(r#"{"message":"saved","resultId":7}"#).expect("parse");
    assert_eq!(ack.message.as_deref(), Some("saved"));
    assert_eq!(ack.extra["resultId"], 7);
}

#[test]
fn recommendations_body() {
    let report: RecommendationsReport = serde_json::from_str(
        r#"{
            "profile":{"personalityProfile":"Analytical","interestSummary":"STEM","metaSummary":"Curious"},
            "completedAt":"2025-06-01T10:00:00Z",
            "recommendations":[{
                "id":1,"title":"Data Scientist","description":"Work with data",
                "type":"career","priority":"high","confidence":87,
                "timeframe":"6-12 months","skills":["Python","Statistics"],
                "actionItems":["Take a course"],"icon":"chart"
            }]
        }"#,
    )
    .expect("parse");

    assert_eq!(report.profile.personality_profile, "Analytical");
    assert!(report.completed_at.is_some());
    let rec = &report.recommendations[0];
    assert_eq!(rec.title, "Data Scientist");
    assert_eq!(rec.priority, Priority::High);
    assert_eq!(rec.action_items, vec!["Take a course".to_string()]);
}

#[test]
fn recommendations_tolerate_missing_sections() {
    let report: RecommendationsReport = serde_json::from_str("{}").expect("parse");
    assert!(report.recommendations.is_empty());
    assert!(report.completed_at.is_none());
}

#[test]
fn activities_body() {
    let resp: ActivitiesResponse = serde_json::from_str(
        r#"{"activities":[{"title":"Completed aptitude test","time":"2 hours ago","type":"test"}]}"#,
    )
    .expect("parse");
    assert_eq!(resp.activities[0].kind.as_deref(), Some("test"));
}

#[test]
fn login_body_with_verification_flag() {
    let resp: AuthResponse = serde_json::from_str(
        r#"{"token":"jwt","user":{"email":"a@b.co"},"requiresVerification":true}"#,
    )
    .expect("parse");
    assert!(resp.requires_verification);
    assert_eq!(resp.to_record().expect("record").token, "jwt");
}
