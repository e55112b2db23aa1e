pub mod activities;
pub mod auth;
pub mod dashboard;
pub mod dispatch;
pub mod recommendations;
pub mod route;
pub mod stats;

use ff_client::ClientError;

/// Turn a client error into what the user should read. Session rejections
/// keep their own message so `main` can point at `ff auth login`.
pub(crate) fn client_error(error: ClientError, fallback: &str) -> anyhow::Error {
    if error.is_unauthorized() {
        return anyhow::Error::new(error);
    }
    tracing::debug!(%error, "request failed");
    anyhow::anyhow!(error.user_message(fallback))
}
