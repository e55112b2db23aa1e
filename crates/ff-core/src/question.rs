//! Aptitude test questions.
//!
//! Questions are immutable once fetched. The ordered set returned for a
//! session is never re-ordered or mutated by the client.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Question identifier. The server may send either a string or a number;
/// the representation it sent is kept so it serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Whether a question accepts exactly one option or any subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    Single,
    Multiple,
}

impl QuestionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }

    #[must_use]
    pub const fn is_multiple(self) -> bool {
        matches!(self, Self::Multiple)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question_text: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    pub options: Vec<String>,
}

impl Question {
    /// Display text of the option at `index`, if it exists.
    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// Check that a fetched question set can back an answer store.
///
/// The set must not be empty, every question needs at least one option and
/// ids must be unique, since answers are keyed by id.
///
/// # Errors
///
/// Returns `CoreError::Malformed` naming the first offending question.
pub fn validate_question_set(questions: &[Question]) -> Result<(), CoreError> {
    if questions.is_empty() {
        return Err(CoreError::malformed("question set", "no questions available"));
    }
    let mut seen = HashSet::with_capacity(questions.len());
    for question in questions {
        if question.options.is_empty() {
            return Err(CoreError::malformed(
                "question set",
                format!("question {} has no options", question.id),
            ));
        }
        if !seen.insert(&question.id) {
            return Err(CoreError::malformed(
                "question set",
                format!("duplicate question id {}", question.id),
            ));
        }
    }
    Ok(())
}
