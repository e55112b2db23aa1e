use serde::{Deserialize, Serialize};

use crate::question::Question;

/// A server-tracked test attempt and its fixed question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub questions: Vec<Question>,
}

impl Session {
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Body of `POST /api/submit-test`.
///
/// Each selected option index is resolved to its display text; multiple
/// selections are joined with `", "`. Built once at submit time and never
/// parsed back by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub session_id: String,
    pub responses: Vec<QuestionResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: String,
    pub answer: String,
}
