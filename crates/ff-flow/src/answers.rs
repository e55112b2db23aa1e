//! Selected option indices per question.

use std::collections::BTreeMap;

use ff_core::QuestionId;

/// Mapping from question id to the option indices chosen for it.
///
/// Entries are kept sorted and duplicate-free. A question with no entry is
/// unanswered; toggling the last option of a multiple-choice question off
/// removes its entry, so "present" always means "non-empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: BTreeMap<QuestionId, Vec<usize>>,
}

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection.
    ///
    /// Single choice replaces the entry with `[option]`. Multiple choice
    /// toggles `option` in or out of the entry.
    pub fn select(&mut self, question: &QuestionId, option: usize, multiple: bool) {
        if !multiple {
            self.entries.insert(question.clone(), vec![option]);
            return;
        }
        let selected = self.entries.entry(question.clone()).or_default();
        match selected.binary_search(&option) {
            Ok(pos) => {
                selected.remove(pos);
            }
            Err(pos) => selected.insert(pos, option),
        }
        if selected.is_empty() {
            self.entries.remove(question);
        }
    }

    /// Selected indices for `question`, ascending. Empty when unanswered.
    #[must_use]
    pub fn selected(&self, question: &QuestionId) -> &[usize] {
        self.entries.get(question).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_answered(&self, question: &QuestionId) -> bool {
        self.entries.contains_key(question)
    }

    /// Number of answered questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &[usize])> {
        self.entries.iter().map(|(id, selected)| (id, selected.as_slice()))
    }
}
