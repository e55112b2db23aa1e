//! # ff-flow
//!
//! The aptitude test as a small state machine:
//!
//! ```text
//! Loading ──▶ Failed
//!    │
//!    ▼
//! Viewing(i) ◀──▶ Viewing(i±1) ──▶ Submitting ──▶ Completed
//!    ▲                                 │
//!    └────────── submit failed ◀───────┘
//! ```
//!
//! - [`Bootstrap`] opens a session and fetches its questions once.
//! - [`AnswerSet`] maps question ids to selected option indices.
//! - [`Navigator`] owns the question pointer and the validation flag.
//! - [`SubmitGuard`] keeps at most one submission in flight.
//! - [`TestFlow`] ties them together over any [`TestApi`].
//! - [`Completion`] is the cosmetic countdown before the redirect.

pub mod answers;
pub mod api;
pub mod bootstrap;
pub mod completion;
pub mod error;
pub mod flow;
pub mod keys;
pub mod navigator;
pub mod phase;
pub mod submission;

pub use answers::AnswerSet;
pub use api::TestApi;
pub use bootstrap::{Bootstrap, BootstrapOutcome};
pub use completion::Completion;
pub use error::FlowError;
pub use flow::{FlowView, KeyEffect, TestFlow};
pub use keys::KeyCommand;
pub use navigator::Navigator;
pub use phase::FlowPhase;
pub use submission::{SubmitGuard, SubmitOutcome};
