//! Question pointer, answer store and the "answer before advancing" rule.

use ff_core::{Question, QuestionId, QuestionResponse, SubmissionPayload};

use crate::answers::AnswerSet;
use crate::error::FlowError;

const MISSING_QUESTION: &str = "[Missing Question]";

/// Navigation and validation over a fixed, ordered question set.
///
/// `advance` refuses to leave an unanswered question and raises the
/// validation flag. `jump_to` does not check answers at all.
#[derive(Debug, Clone)]
pub struct Navigator {
    questions: Vec<Question>,
    answers: AnswerSet,
    index: usize,
    validation_error: bool,
}

impl Navigator {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: AnswerSet::new(),
            index: 0,
            validation_error: false,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub const fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn validation_error(&self) -> bool {
        self.validation_error
    }

    pub const fn flag_validation_error(&mut self) {
        self.validation_error = true;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    /// Select `option` for `question`. The question's own type decides
    /// between replace and toggle. Clears the validation flag.
    ///
    /// # Errors
    ///
    /// `UnknownQuestion` for an id outside the session, `OptionOutOfRange`
    /// for an index past the question's options. The store is unchanged.
    pub fn select_option(&mut self, question: &QuestionId, option: usize) -> Result<(), FlowError> {
        let target = self
            .questions
            .iter()
            .find(|q| &q.id == question)
            .ok_or_else(|| FlowError::UnknownQuestion(question.clone()))?;
        if option >= target.options.len() {
            return Err(FlowError::OptionOutOfRange {
                question: question.clone(),
                index: option,
                len: target.options.len(),
            });
        }
        let multiple = target.kind.is_multiple();
        self.answers.select(question, option, multiple);
        self.validation_error = false;
        Ok(())
    }

    /// [`Self::select_option`] on the question under the pointer.
    ///
    /// # Errors
    ///
    /// As [`Self::select_option`]; `IndexOutOfRange` with no questions.
    pub fn select_current(&mut self, option: usize) -> Result<(), FlowError> {
        let id = self
            .current()
            .map(|q| q.id.clone())
            .ok_or(FlowError::IndexOutOfRange {
                index: self.index,
                len: self.questions.len(),
            })?;
        self.select_option(&id, option)
    }

    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.current()
            .is_some_and(|q| self.answers.is_answered(&q.id))
    }

    /// Move forward one question. Returns whether the pointer moved.
    ///
    /// On an unanswered question this raises the validation flag and stays
    /// put. On the last question it is a no-op.
    pub fn advance(&mut self) -> bool {
        if !self.is_current_answered() {
            self.validation_error = true;
            return false;
        }
        self.validation_error = false;
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move back one question, stopping at the first. Always allowed.
    pub const fn retreat(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move straight to `index` without checking answers.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when `index` is not a question position.
    pub fn jump_to(&mut self, index: usize) -> Result<(), FlowError> {
        if index >= self.questions.len() {
            return Err(FlowError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// Answered share of the session in `[0, 100]`. Zero questions gives 0.
    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        let answered = self
            .questions
            .iter()
            .filter(|q| self.answers.is_answered(&q.id))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let pct = answered as f64 / self.questions.len() as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| !self.answers.is_answered(&q.id))
            .count()
    }

    /// Option texts selected for `question`, joined with `", "`.
    #[must_use]
    pub fn answer_text(&self, question: &Question) -> Option<String> {
        let texts: Vec<&str> = self
            .answers
            .selected(&question.id)
            .iter()
            .filter_map(|&index| question.option(index))
            .collect();
        (!texts.is_empty()).then(|| texts.join(", "))
    }

    /// Resolve every answer to its option text, in question order.
    ///
    /// Returns `None` while any question is unanswered; a payload is only
    /// ever built complete.
    #[must_use]
    pub fn build_payload(&self, session_id: &str) -> Option<SubmissionPayload> {
        let responses = self
            .questions
            .iter()
            .map(|question| {
                let answer = self.answer_text(question)?;
                let text = if question.question_text.trim().is_empty() {
                    MISSING_QUESTION.to_string()
                } else {
                    question.question_text.clone()
                };
                Some(QuestionResponse {
                    question: text,
                    answer,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(SubmissionPayload {
            session_id: session_id.to_string(),
            responses,
        })
    }
}
