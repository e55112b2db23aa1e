//! Single-slot guard for the submit request and its outcomes.

use std::sync::atomic::{AtomicBool, Ordering};

use ff_core::responses::SubmitAck;
use serde::Serialize;

pub const SUBMIT_FALLBACK: &str = "Failed to submit test. Please try again.";

/// What a call to submit did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The server accepted the answers.
    Submitted { ack: SubmitAck },
    /// The current question has no answer; the validation flag is set.
    CurrentUnanswered,
    /// Some other question has no answer; nothing was sent.
    Incomplete { remaining: usize },
    /// The server or network rejected the submission; answers are kept.
    Failed { message: String },
    /// A submission is already in flight.
    InFlight,
    /// The flow was torn down while the request was pending.
    Discarded,
}

impl SubmitOutcome {
    /// Text for the user, if the outcome warrants one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Incomplete { remaining } => Some(format!(
                "Please answer all questions. {remaining} question(s) remaining."
            )),
            Self::CurrentUnanswered => Some("Please select an answer before continuing.".into()),
            Self::Failed { message } => Some(message.clone()),
            Self::Submitted { .. } | Self::InFlight | Self::Discarded => None,
        }
    }
}

/// At most one submission in flight. The slot frees itself when the permit
/// drops, on every exit path.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    busy: AtomicBool,
}

#[derive(Debug)]
pub struct SubmitPermit<'a> {
    guard: &'a SubmitGuard,
}

impl SubmitGuard {
    #[must_use]
    pub fn try_acquire(&self) -> Option<SubmitPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SubmitPermit { guard: self })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn guard_admits_one_holder_at_a_time() {
        let guard = SubmitGuard::default();
        let permit = guard.try_acquire().expect("first");
        assert!(guard.try_acquire().is_none());
        assert!(guard.is_busy());
        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn incomplete_message_counts_remaining() {
        assert_eq!(
            SubmitOutcome::Incomplete { remaining: 2 }.message().as_deref(),
            Some("Please answer all questions. 2 question(s) remaining.")
        );
        assert_eq!(SubmitOutcome::InFlight.message(), None);
    }
}
