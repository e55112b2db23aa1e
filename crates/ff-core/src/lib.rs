//! # ff-core
//!
//! Core types shared across all FutureForge crates:
//! - Question and session types for the aptitude test
//! - Submission payload (the denormalized projection sent at submit time)
//! - Typed results for every API endpoint the client consumes
//! - User record and profile types persisted by `ff-auth`
//! - Client route table
//! - Local form validation for signup/login/verification
//! - Cross-cutting error type

pub mod errors;
pub mod question;
pub mod responses;
pub mod routes;
pub mod session;
pub mod user;
pub mod validation;

pub use errors::CoreError;
pub use question::{Question, QuestionId, QuestionKind};
pub use routes::Route;
pub use session::{QuestionResponse, Session, SubmissionPayload};
pub use user::{UserPatch, UserProfile, UserRecord};
