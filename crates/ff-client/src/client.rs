use std::sync::Arc;
use std::time::Duration;

use ff_auth::AuthContext;
use ff_config::ApiConfig;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ClientError, server_message};
use crate::paths::requires_auth;

/// HTTP client bound to one base URL and one auth context.
///
/// Cloning is cheap; clones share the connection pool and the auth context.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    auth: Arc<AuthContext>,
}

impl ApiClient {
    /// Build a client from validated API settings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidConfig` if the settings do not validate or
    /// the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, auth: Arc<AuthContext>) -> Result<Self, ClientError> {
        config
            .validate()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            timeout: config.timeout(),
            auth,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(Method::GET, path, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        self.send(Method::POST, path, body).await
    }

    /// Attach the bearer token, or fail before touching the network when a
    /// protected path has none.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        if !requires_auth(path) {
            return Ok(builder);
        }
        let token = self.auth.token().ok_or(ClientError::NotAuthenticated)?;
        Ok(builder.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        tracing::debug!(%method, path, "api request");
        let mut builder = self.request(method, path)?;
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(path, &e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(path, &e))?;
        tracing::debug!(path, status = status.as_u16(), len = bytes.len(), "api response");

        if status == StatusCode::UNAUTHORIZED {
            self.auth.invalidate();
            return Err(ClientError::Unauthorized {
                message: error_message(&bytes),
            });
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }
        parse_body(path, &bytes)
    }

    fn transport_error(&self, path: &str, error: &reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout {
                endpoint: path.to_string(),
                timeout: self.timeout,
            }
        } else {
            ClientError::Network {
                endpoint: path.to_string(),
                reason: error.to_string(),
            }
        }
    }
}

fn error_message(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .and_then(|body| server_message(&body))
}

/// Parse a success body. An empty body reads as `{}`.
fn parse_body<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<T, ClientError> {
    let parsed = if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Object(Map::new()))
    } else {
        serde_json::from_slice(bytes)
    };
    parsed.map_err(|e| ClientError::Malformed {
        endpoint: path.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use ff_core::responses::{StartSessionResponse, SubmitAck};

    use super::*;

    #[test]
    fn empty_success_body_reads_as_empty_object() {
        let ack: SubmitAck = parse_body("/api/submit-test", b"").expect("empty ack");
        assert!(ack.message.is_none());

        let err = parse_body::<StartSessionResponse>("/api/start-session", b"  ")
            .expect_err("sessionId is required");
        assert!(matches!(err, ClientError::Malformed { .. }));
    }

    #[test]
    fn error_message_ignores_non_json_bodies() {
        assert_eq!(error_message(b"<html>Bad Gateway</html>"), None);
        assert_eq!(
            error_message(br#"{"error":"Session not found"}"#).as_deref(),
            Some("Session not found")
        );
    }
}
