//! The test flow: one attempt, from bootstrap to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use ff_core::{Question, QuestionId};
use serde::Serialize;

use crate::api::TestApi;
use crate::bootstrap::{Bootstrap, BootstrapOutcome};
use crate::error::FlowError;
use crate::keys::KeyCommand;
use crate::navigator::Navigator;
use crate::phase::FlowPhase;
use crate::submission::{SUBMIT_FALLBACK, SubmitGuard, SubmitOutcome};

#[derive(Debug)]
struct FlowState {
    phase: FlowPhase,
    session_id: Option<String>,
    navigator: Option<Navigator>,
    message: Option<String>,
}

impl FlowState {
    fn transition(&mut self, next: FlowPhase) {
        if self.phase.can_transition_to(next) {
            tracing::debug!(from = %self.phase, to = %next, "flow transition");
            self.phase = next;
        } else {
            tracing::warn!(from = %self.phase, to = %next, "ignoring invalid flow transition");
        }
    }
}

/// Snapshot of the flow for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowView {
    pub phase: FlowPhase,
    pub index: usize,
    pub total: usize,
    pub question: Option<Question>,
    pub selected: Vec<usize>,
    pub validation_error: bool,
    pub progress: f64,
    pub is_last: bool,
    pub message: Option<String>,
}

/// What a line of input did.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyEffect {
    /// State may have changed; re-render.
    Updated,
    /// Input referred to something that does not exist; nothing changed.
    Ignored,
    Submitted(SubmitOutcome),
    Help,
    Quit,
}

/// One test attempt over a [`TestApi`].
///
/// All methods take `&self`; the flow can be shared behind an `Arc` and
/// driven from several tasks. Session data is owned here and nowhere else.
#[derive(Debug)]
pub struct TestFlow<A> {
    api: A,
    state: Mutex<FlowState>,
    bootstrap: Bootstrap,
    submit_guard: SubmitGuard,
    detached: AtomicBool,
}

impl<A: TestApi> TestFlow<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(FlowState {
                phase: FlowPhase::Loading,
                session_id: None,
                navigator: None,
                message: None,
            }),
            bootstrap: Bootstrap::new(),
            submit_guard: SubmitGuard::default(),
            detached: AtomicBool::new(false),
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn phase(&self) -> FlowPhase {
        self.lock().phase
    }

    #[must_use]
    pub fn session_id(&self) -> Option<String> {
        self.lock().session_id.clone()
    }

    #[must_use]
    pub fn view(&self) -> FlowView {
        let state = self.lock();
        let nav = state.navigator.as_ref();
        let question = nav.and_then(Navigator::current).cloned();
        let selected = match (nav, &question) {
            (Some(nav), Some(q)) => nav.answers().selected(&q.id).to_vec(),
            _ => Vec::new(),
        };
        FlowView {
            phase: state.phase,
            index: nav.map_or(0, Navigator::index),
            total: nav.map_or(0, Navigator::len),
            question,
            selected,
            validation_error: nav.is_some_and(Navigator::validation_error),
            progress: nav.map_or(0.0, Navigator::progress_percentage),
            is_last: nav.is_some_and(Navigator::is_last),
            message: state.message.clone(),
        }
    }

    /// Answered share of the session in `[0, 100]`.
    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        self.lock()
            .navigator
            .as_ref()
            .map_or(0.0, Navigator::progress_percentage)
    }

    /// Stop applying results. Anything still in flight is discarded when it
    /// returns.
    pub fn teardown(&self) {
        if !self.detached.swap(true, Ordering::SeqCst) {
            tracing::debug!("test flow torn down");
        }
    }

    /// Bootstrap the session. A second call while the first is pending, or
    /// after it succeeded, sends nothing. After a failure it retries.
    ///
    /// # Errors
    ///
    /// `FlowError::Bootstrap` (the flow is then `Failed`), a client error
    /// for a rejected session, or `Detached`.
    pub async fn start(&self) -> Result<BootstrapOutcome, FlowError> {
        if self.is_detached() {
            return Err(FlowError::Detached);
        }
        {
            let mut state = self.lock();
            if state.phase == FlowPhase::Failed {
                state.transition(FlowPhase::Loading);
                state.message = None;
            }
        }

        let outcome = self.bootstrap.start(&self.api).await;
        if self.is_detached() {
            return Ok(BootstrapOutcome::Discarded);
        }

        let mut state = self.lock();
        match outcome {
            Ok(BootstrapOutcome::Started(session)) => {
                state.session_id = Some(session.session_id.clone());
                state.navigator = Some(Navigator::new(session.questions.clone()));
                state.transition(FlowPhase::Viewing);
                Ok(BootstrapOutcome::Started(session))
            }
            Ok(other) => Ok(other),
            Err(error) => {
                state.transition(FlowPhase::Failed);
                state.message = Some(match &error {
                    FlowError::Bootstrap(message) => message.clone(),
                    other => other.to_string(),
                });
                Err(error)
            }
        }
    }

    fn with_navigator<R>(
        &self,
        f: impl FnOnce(&mut Navigator) -> Result<R, FlowError>,
    ) -> Result<R, FlowError> {
        if self.is_detached() {
            return Err(FlowError::Detached);
        }
        let mut state = self.lock();
        let phase = state.phase;
        if phase != FlowPhase::Viewing {
            return Err(FlowError::WrongPhase(phase));
        }
        let nav = state
            .navigator
            .as_mut()
            .ok_or(FlowError::WrongPhase(phase))?;
        f(nav)
    }

    /// # Errors
    ///
    /// See [`Navigator::select_option`]; `WrongPhase` outside `Viewing`.
    pub fn select_option(&self, question: &QuestionId, option: usize) -> Result<(), FlowError> {
        self.with_navigator(|nav| nav.select_option(question, option))
    }

    /// # Errors
    ///
    /// See [`Navigator::select_current`]; `WrongPhase` outside `Viewing`.
    pub fn select_current(&self, option: usize) -> Result<(), FlowError> {
        self.with_navigator(|nav| nav.select_current(option))
    }

    /// # Errors
    ///
    /// `WrongPhase` outside `Viewing`.
    pub fn is_current_answered(&self) -> Result<bool, FlowError> {
        self.with_navigator(|nav| Ok(nav.is_current_answered()))
    }

    /// # Errors
    ///
    /// `WrongPhase` outside `Viewing`.
    pub fn advance(&self) -> Result<bool, FlowError> {
        self.with_navigator(|nav| Ok(nav.advance()))
    }

    /// # Errors
    ///
    /// `WrongPhase` outside `Viewing`.
    pub fn retreat(&self) -> Result<bool, FlowError> {
        self.with_navigator(|nav| Ok(nav.retreat()))
    }

    /// # Errors
    ///
    /// See [`Navigator::jump_to`]; `WrongPhase` outside `Viewing`.
    pub fn jump_to(&self, index: usize) -> Result<(), FlowError> {
        self.with_navigator(|nav| nav.jump_to(index))
    }

    /// Validate and send the answers.
    ///
    /// Unanswered questions come back as outcomes, never as errors, and
    /// nothing is sent. A failed request returns the flow to `Viewing` with
    /// every answer kept.
    ///
    /// # Errors
    ///
    /// `WrongPhase` outside `Viewing`, `Detached`, or the client error when
    /// the server rejected the session itself.
    pub async fn submit(&self) -> Result<SubmitOutcome, FlowError> {
        if self.is_detached() {
            return Err(FlowError::Detached);
        }
        let Some(_permit) = self.submit_guard.try_acquire() else {
            tracing::debug!("submit already in flight");
            return Ok(SubmitOutcome::InFlight);
        };

        let payload = {
            let mut guard = self.lock();
            let state = &mut *guard;
            if state.phase != FlowPhase::Viewing {
                return Err(FlowError::WrongPhase(state.phase));
            }
            let (Some(nav), Some(session_id)) = (state.navigator.as_mut(), &state.session_id)
            else {
                return Err(FlowError::WrongPhase(state.phase));
            };
            if !nav.is_current_answered() {
                nav.flag_validation_error();
                return Ok(SubmitOutcome::CurrentUnanswered);
            }
            let Some(payload) = nav.build_payload(session_id) else {
                let outcome = SubmitOutcome::Incomplete {
                    remaining: nav.unanswered_count(),
                };
                state.message = outcome.message();
                return Ok(outcome);
            };
            state.message = None;
            state.transition(FlowPhase::Submitting);
            payload
        };

        tracing::info!(
            session_id = %payload.session_id,
            responses = payload.responses.len(),
            "submitting test"
        );
        let result = self.api.submit_test(&payload).await;
        if self.is_detached() {
            return Ok(SubmitOutcome::Discarded);
        }

        let mut state = self.lock();
        match result {
            Ok(ack) => {
                state.transition(FlowPhase::Completed);
                tracing::info!("test submitted");
                Ok(SubmitOutcome::Submitted { ack })
            }
            Err(error) => {
                state.transition(FlowPhase::Viewing);
                let message = error.user_message(SUBMIT_FALLBACK);
                state.message = Some(message.clone());
                tracing::warn!(%error, "test submission failed");
                if error.is_unauthorized() {
                    return Err(FlowError::Client(error));
                }
                Ok(SubmitOutcome::Failed { message })
            }
        }
    }

    /// Apply one line of input.
    ///
    /// Digits select only when the current question has that option. Enter
    /// advances, or submits on the last question.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation returns.
    pub async fn handle_key(&self, command: KeyCommand) -> Result<KeyEffect, FlowError> {
        match command {
            KeyCommand::Select(option) => {
                let exists = self.with_navigator(|nav| {
                    Ok(nav.current().is_some_and(|q| q.option(option).is_some()))
                })?;
                if !exists {
                    return Ok(KeyEffect::Ignored);
                }
                self.select_current(option)?;
                self.lock().message = None;
                Ok(KeyEffect::Updated)
            }
            KeyCommand::Enter => {
                let last = self.with_navigator(|nav| Ok(nav.is_last()))?;
                if last {
                    return Ok(KeyEffect::Submitted(self.submit().await?));
                }
                self.advance()?;
                Ok(KeyEffect::Updated)
            }
            KeyCommand::Back => {
                self.retreat()?;
                Ok(KeyEffect::Updated)
            }
            KeyCommand::Jump(index) => match self.jump_to(index) {
                Ok(()) => Ok(KeyEffect::Updated),
                Err(FlowError::IndexOutOfRange { .. }) => Ok(KeyEffect::Ignored),
                Err(other) => Err(other),
            },
            KeyCommand::Submit => Ok(KeyEffect::Submitted(self.submit().await?)),
            KeyCommand::Help => Ok(KeyEffect::Help),
            KeyCommand::Quit => {
                self.teardown();
                Ok(KeyEffect::Quit)
            }
        }
    }
}
