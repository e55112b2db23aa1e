//! The three calls the flow makes, as a seam for tests.

use std::future::Future;

use ff_client::{ApiClient, ClientError};
use ff_core::responses::SubmitAck;
use ff_core::{Question, SubmissionPayload};

pub trait TestApi: Send + Sync {
    /// Open a session; returns its id.
    fn start_session(&self) -> impl Future<Output = Result<String, ClientError>> + Send;

    /// Fetch the ordered question set for the open session.
    fn test_questions(&self) -> impl Future<Output = Result<Vec<Question>, ClientError>> + Send;

    fn submit_test(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<SubmitAck, ClientError>> + Send;
}

impl TestApi for ApiClient {
    fn start_session(&self) -> impl Future<Output = Result<String, ClientError>> + Send {
        Self::start_session(self)
    }

    fn test_questions(&self) -> impl Future<Output = Result<Vec<Question>, ClientError>> + Send {
        Self::test_questions(self)
    }

    fn submit_test(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<SubmitAck, ClientError>> + Send {
        Self::submit_test(self, payload)
    }
}
