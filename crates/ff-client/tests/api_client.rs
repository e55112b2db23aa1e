//! The client against a scripted local server: header injection, the public
//! allow-list, 401 invalidation and error mapping.

mod support;

use std::sync::Arc;
use std::time::Duration;

use ff_auth::{AuthContext, MemoryUserStore, UserStore};
use ff_client::{ApiClient, ClientError};
use ff_config::ApiConfig;
use ff_core::{QuestionResponse, Route, SubmissionPayload, UserProfile, UserRecord};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{MockServer, Reply};

fn logged_in_store(token: &str) -> Arc<MemoryUserStore> {
    Arc::new(MemoryUserStore::with_record(UserRecord {
        token: token.into(),
        user: UserProfile::default(),
    }))
}

fn client_for(server: &MockServer, store: Arc<MemoryUserStore>, timeout_ms: u64) -> ApiClient {
    let config = ApiConfig {
        base_url: server.base_url(),
        timeout_ms,
    };
    ApiClient::new(&config, Arc::new(AuthContext::hydrate(store))).expect("client")
}

#[tokio::test]
async fn protected_routes_carry_the_bearer_token() {
    let server = MockServer::start(|_| Reply::json(200, json!({"sessionId": "sess_1"})));
    let client = client_for(&server, logged_in_store("tok-123"), 2000);

    let session_id = client.start_session().await.expect("start session");

    assert_eq!(session_id, "sess_1");
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/start-session");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn public_routes_never_carry_a_token() {
    let server = MockServer::start(|_| {
        Reply::json(200, json!({"token": "fresh", "user": {"email": "a@b.co"}}))
    });
    let client = client_for(&server, logged_in_store("old"), 2000);

    let resp = client.login("a@b.co", "Password1").await.expect("login");

    assert_eq!(resp.to_record().expect("record").token, "fresh");
    let request = &server.requests()[0];
    assert_eq!(request.path, "/auth/login");
    assert_eq!(request.authorization, None);
    assert_eq!(request.json(), json!({"email": "a@b.co", "password": "Password1"}));
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start(|_| Reply::json(200, json!({"sessionId": "never"})));
    let client = client_for(&server, Arc::new(MemoryUserStore::default()), 2000);

    let err = client.start_session().await.expect_err("no token");
    assert!(matches!(err, ClientError::NotAuthenticated));
    assert!(err.to_string().contains("no authentication token found"));
    assert!(server.requests().is_empty());

    client
        .resend_code("a@b.co")
        .await
        .expect("public route works logged out");
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn unauthorized_clears_credentials_once_and_still_fails() {
    let server = MockServer::start(|_| Reply::json(401, json!({"message": "jwt expired"})));
    let store = logged_in_store("stale");
    let client = client_for(&server, Arc::clone(&store), 2000);

    let (stats, activities) = tokio::join!(client.user_stats(), client.activities());

    for result in [stats.map(|_| ()), activities.map(|_| ())] {
        match result {
            Err(ClientError::Unauthorized { message }) => {
                assert_eq!(message.as_deref(), Some("jwt expired"));
            }
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }
    assert_eq!(store.clear_count(), 1);
    assert!(store.load().expect("load").is_none());
    assert!(!client.auth().is_authenticated());
    assert_eq!(client.auth().pending_redirect(), Some(Route::Login));

    // Logged out now: the next protected call never leaves the process.
    let before = server.requests().len();
    let err = client.recommendations().await.expect_err("logged out");
    assert!(matches!(err, ClientError::NotAuthenticated));
    assert_eq!(server.requests().len(), before);
}

#[tokio::test]
async fn submit_sends_the_payload_and_surfaces_server_errors() {
    let server = MockServer::start(|req| {
        if req.json()["sessionId"] == "sess_ok" {
            Reply::raw(200, "")
        } else {
            Reply::json(400, json!({"error": "Session not found"}))
        }
    });
    let client = client_for(&server, logged_in_store("tok"), 2000);
    let payload = |session: &str| SubmissionPayload {
        session_id: session.into(),
        responses: vec![QuestionResponse {
            question: "Hobbies?".into(),
            answer: "Chess, Music".into(),
        }],
    };

    let ack = client.submit_test(&payload("sess_ok")).await.expect("ack");
    assert!(ack.message.is_none());
    assert_eq!(
        server.requests()[0].json(),
        json!({
            "sessionId": "sess_ok",
            "responses": [{"question": "Hobbies?", "answer": "Chess, Music"}]
        })
    );

    let err = client
        .submit_test(&payload("sess_gone"))
        .await
        .expect_err("rejected");
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.user_message("Failed to submit test. Please try again."),
        "Session not found"
    );
}

#[tokio::test]
async fn non_json_error_body_uses_the_fallback() {
    let server = MockServer::start(|_| Reply::raw(502, "<html>Bad Gateway</html>"));
    let client = client_for(&server, logged_in_store("tok"), 2000);

    let err = client.user_stats().await.expect_err("502");
    assert_eq!(err.user_message("Unknown error"), "Unknown error");
}

#[tokio::test]
async fn malformed_question_sets_are_rejected() {
    let server = MockServer::start(|req| match req.path.as_str() {
        "/api/test-questions" => Reply::json(
            200,
            json!({"questions": [
                {"id": 1, "question_text": "A?", "type": "single", "options": ["x"]},
                {"id": 1, "question_text": "B?", "type": "single", "options": ["y"]}
            ]}),
        ),
        _ => Reply::json(200, json!({"activities": "none"})),
    });
    let client = client_for(&server, logged_in_store("tok"), 2000);

    let err = client.test_questions().await.expect_err("duplicate ids");
    assert!(matches!(err, ClientError::Malformed { .. }));
    assert!(err.to_string().contains("duplicate question id 1"));

    let err = client.activities().await.expect_err("not an array");
    assert!(matches!(err, ClientError::Malformed { .. }));
}

#[tokio::test]
async fn empty_question_set_is_malformed() {
    let server = MockServer::start(|_| Reply::json(200, json!({"questions": []})));
    let client = client_for(&server, logged_in_store("tok"), 2000);

    let err = client.test_questions().await.expect_err("no questions");
    assert!(matches!(err, ClientError::Malformed { .. }));
    assert!(err.to_string().contains("no questions available"));
}

#[tokio::test]
async fn blank_session_id_is_malformed() {
    let server = MockServer::start(|_| Reply::json(200, json!({"sessionId": "  "})));
    let client = client_for(&server, logged_in_store("tok"), 2000);

    let err = client.start_session().await.expect_err("blank id");
    assert!(matches!(err, ClientError::Malformed { .. }));
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = MockServer::start(|_| {
        Reply::json(200, json!({"sessionId": "late"})).after(Duration::from_millis(600))
    });
    let client = client_for(&server, logged_in_store("tok"), 100);

    let err = client.start_session().await.expect_err("timeout");
    assert!(matches!(err, ClientError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn refresh_user_replaces_the_stored_record() {
    let server = MockServer::start(|_| {
        Reply::json(
            200,
            json!({"data": {"token": "renewed", "user": {"username": "alex", "hasTakenTest": true}}}),
        )
    });
    let store = logged_in_store("tok");
    let client = client_for(&server, Arc::clone(&store), 2000);

    let record = client.refresh_user().await.expect("refresh");

    assert_eq!(record.token, "renewed");
    assert_eq!(server.requests()[0].path, "/auth/current-user");
    let stored = store.load().expect("load").expect("record");
    assert_eq!(stored.token, "renewed");
    assert!(stored.user.has_taken_test);
    assert!(client.auth().state().has_taken_test());
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:1".into(),
        timeout_ms: 2000,
    };
    let ctx = Arc::new(AuthContext::hydrate(logged_in_store("tok")));
    let client = ApiClient::new(&config, ctx).expect("client");

    let err = client.user_stats().await.expect_err("refused");
    assert!(
        matches!(err, ClientError::Network { .. } | ClientError::Timeout { .. }),
        "got {err:?}"
    );
}

#[test]
fn invalid_base_url_is_rejected_up_front() {
    let config = ApiConfig {
        base_url: "localhost:5000".into(),
        timeout_ms: 5000,
    };
    let ctx = Arc::new(AuthContext::hydrate(Arc::new(MemoryUserStore::default())));
    let err = ApiClient::new(&config, ctx).expect_err("no scheme");
    assert!(matches!(err, ClientError::InvalidConfig(_)));
}
