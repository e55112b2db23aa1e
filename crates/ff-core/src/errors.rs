//! Cross-cutting error types for FutureForge.
//!
//! Transport errors live in `ff-client`, flow errors in `ff-flow`. This module
//! only covers shape and form problems that any crate can detect.

use thiserror::Error;

use crate::validation::FieldIssue;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A payload did not have the shape the client expects.
    #[error("malformed {what}: {reason}")]
    Malformed { what: String, reason: String },

    /// One or more form fields failed local validation.
    #[error("{}", format_issues(.0))]
    InvalidForm(Vec<FieldIssue>),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn malformed(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            what: what.into(),
            reason: reason.into(),
        }
    }
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}
