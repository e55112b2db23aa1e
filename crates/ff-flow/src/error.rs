use ff_client::ClientError;
use ff_core::QuestionId;
use thiserror::Error;

use crate::phase::FlowPhase;

/// Misuse of the flow, or a failure that must leave it.
///
/// Unanswered questions are not errors; they show up as the validation
/// flag and as [`crate::SubmitOutcome`] values.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("no question with id {0} in this session")]
    UnknownQuestion(QuestionId),

    #[error("question {question} has {len} options; index {index} is out of range")]
    OptionOutOfRange {
        question: QuestionId,
        index: usize,
        len: usize,
    },

    #[error("question {index} does not exist (session has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("not available while the test is {0}")]
    WrongPhase(FlowPhase),

    #[error("the test flow was closed")]
    Detached,

    #[error("could not load the test: {0}")]
    Bootstrap(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}
