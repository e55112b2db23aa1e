//! One-shot session start.

use std::sync::atomic::{AtomicBool, Ordering};

use ff_core::Session;

use crate::api::TestApi;
use crate::error::FlowError;

const UNKNOWN_ERROR: &str = "Unknown error";
const NO_QUESTIONS: &str = "No questions available.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Started(Session),
    /// Another start is in flight or already succeeded; nothing was sent.
    Suppressed,
    /// The owning flow was torn down before the result arrived.
    Discarded,
}

/// Idempotency guard around start-session + fetch-questions.
///
/// The flag is taken before the first request and only given back when a
/// start fails, so a retry can run.
#[derive(Debug, Default)]
pub struct Bootstrap {
    claimed: AtomicBool,
}

impl Bootstrap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::SeqCst)
    }

    /// Open a session, then fetch its questions. The two calls never
    /// overlap.
    ///
    /// # Errors
    ///
    /// `FlowError::Bootstrap` with a user-facing message when either call
    /// fails or the session has no questions. The guard is released first.
    pub async fn start<A: TestApi>(&self, api: &A) -> Result<BootstrapOutcome, FlowError> {
        if self
            .claimed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("bootstrap already claimed; suppressing duplicate start");
            return Ok(BootstrapOutcome::Suppressed);
        }

        match Self::fetch(api).await {
            Ok(session) if session.questions.is_empty() => {
                self.claimed.store(false, Ordering::SeqCst);
                tracing::warn!(session_id = %session.session_id, "test session has no questions");
                Err(FlowError::Bootstrap(NO_QUESTIONS.into()))
            }
            Ok(session) => {
                tracing::info!(
                    session_id = %session.session_id,
                    questions = session.len(),
                    "test session started"
                );
                Ok(BootstrapOutcome::Started(session))
            }
            Err(error) => {
                self.claimed.store(false, Ordering::SeqCst);
                tracing::warn!(%error, "test session failed to start");
                if error.is_unauthorized() {
                    return Err(FlowError::Client(error));
                }
                Err(FlowError::Bootstrap(error.user_message(UNKNOWN_ERROR)))
            }
        }
    }

    async fn fetch<A: TestApi>(api: &A) -> Result<Session, ff_client::ClientError> {
        let session_id = api.start_session().await?;
        let questions = api.test_questions().await?;
        Ok(Session {
            session_id,
            questions,
        })
    }
}
