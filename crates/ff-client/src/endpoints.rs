//! Typed calls for every endpoint the client consumes.

use ff_core::question::validate_question_set;
use ff_core::responses::{
    ActivitiesResponse, Activity, QuestionsResponse, RecommendationsReport, StartSessionResponse,
    SubmitAck, UserStats,
};
use ff_core::user::AuthResponse;
use ff_core::{Question, SubmissionPayload, UserRecord};
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::paths;

fn malformed(endpoint: &str, reason: impl Into<String>) -> ClientError {
    ClientError::Malformed {
        endpoint: endpoint.to_string(),
        reason: reason.into(),
    }
}

impl ApiClient {
    // -- test flow --------------------------------------------------------

    /// `POST /api/start-session`. Returns the new session id.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors, or `Malformed` for a missing or blank
    /// `sessionId`.
    pub async fn start_session(&self) -> Result<String, ClientError> {
        let resp: StartSessionResponse = self.post(paths::START_SESSION, None).await?;
        if resp.session_id.trim().is_empty() {
            return Err(malformed(paths::START_SESSION, "empty sessionId"));
        }
        Ok(resp.session_id)
    }

    /// `POST /api/test-questions`. The set is checked for unique ids and
    /// non-empty option lists before it is returned.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors, or `Malformed` for a body without a
    /// `questions` array or a set that fails validation.
    pub async fn test_questions(&self) -> Result<Vec<Question>, ClientError> {
        let resp: QuestionsResponse = self.post(paths::TEST_QUESTIONS, None).await?;
        validate_question_set(&resp.questions)
            .map_err(|e| malformed(paths::TEST_QUESTIONS, e.to_string()))?;
        Ok(resp.questions)
    }

    /// `POST /api/submit-test`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors.
    pub async fn submit_test(&self, payload: &SubmissionPayload) -> Result<SubmitAck, ClientError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| malformed(paths::SUBMIT_TEST, format!("serialize payload: {e}")))?;
        self.post(paths::SUBMIT_TEST, Some(body)).await
    }

    // -- results ----------------------------------------------------------

    /// `GET /api/recommendations`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors, or `Malformed` for an unparseable body.
    pub async fn recommendations(&self) -> Result<RecommendationsReport, ClientError> {
        self.get(paths::RECOMMENDATIONS).await
    }

    /// `GET /api/userStats`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors, or `Malformed` for an unparseable body.
    pub async fn user_stats(&self) -> Result<UserStats, ClientError> {
        self.get(paths::USER_STATS).await
    }

    /// `GET /api/user/activities`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors, or `Malformed` when `activities` is not an
    /// array.
    pub async fn activities(&self) -> Result<Vec<Activity>, ClientError> {
        let resp: ActivitiesResponse = self.get(paths::USER_ACTIVITIES).await?;
        Ok(resp.activities)
    }

    // -- auth -------------------------------------------------------------

    /// `POST /auth/login`. The caller decides whether to store the result.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        self.post(
            paths::LOGIN,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// `POST /auth/signup`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        self.post(
            paths::SIGNUP,
            Some(json!({ "username": username, "email": email, "password": password })),
        )
        .await
    }

    /// `POST /auth/confirm-code`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors.
    pub async fn confirm_code(&self, email: &str, code: &str) -> Result<AuthResponse, ClientError> {
        self.post(
            paths::CONFIRM_CODE,
            Some(json!({ "email": email, "code": code })),
        )
        .await
    }

    /// `POST /auth/resend-code`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors.
    pub async fn resend_code(&self, email: &str) -> Result<AuthResponse, ClientError> {
        self.post(paths::RESEND_CODE, Some(json!({ "email": email })))
            .await
    }

    /// `GET /auth/current-user`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors, or `Malformed` when the body carries no
    /// token.
    pub async fn current_user(&self) -> Result<UserRecord, ClientError> {
        let resp: AuthResponse = self.get(paths::CURRENT_USER).await?;
        resp.to_record()
            .ok_or_else(|| malformed(paths::CURRENT_USER, "no token in response"))
    }

    /// Fetch the current user and replace the stored record with it.
    ///
    /// # Errors
    ///
    /// Anything [`Self::current_user`] returns, or the store's error.
    pub async fn refresh_user(&self) -> Result<UserRecord, ClientError> {
        let record = self.current_user().await?;
        self.auth().login(record.clone())?;
        tracing::info!(user = record.user.display_name(), "refreshed stored user");
        Ok(record)
    }
}
