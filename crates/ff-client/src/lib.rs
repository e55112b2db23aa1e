//! # ff-client
//!
//! Thin HTTP client for the FutureForge API.
//!
//! Every request except the four public `/auth/*` routes carries
//! `Authorization: Bearer <token>` taken from the shared
//! [`ff_auth::AuthContext`]. Without a token those requests fail locally,
//! before any network round-trip. A 401 from the server invalidates the
//! context (credentials cleared, redirect to login flagged) and the call
//! still fails so the caller's error path runs.
//!
//! Response bodies are parsed into `ff-core` types at this boundary; a body
//! of the wrong shape is a [`ClientError::Malformed`].

mod client;
mod endpoints;
pub mod error;
pub mod paths;

pub use client::ApiClient;
pub use error::ClientError;
pub use paths::{PUBLIC_ROUTES, requires_auth};
