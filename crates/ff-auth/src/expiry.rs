use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::AuthError;

/// Decode the JWT `exp` claim without verifying the signature.
///
/// The server owns token validation; this only feeds `ff auth status`.
///
/// # Errors
///
/// Returns `AuthError::Other` if the token is not a JWT or has no usable
/// `exp` claim.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}

/// Whether the token is expired or expires within `buffer_secs`.
/// Opaque (non-JWT) tokens are never considered expired.
#[must_use]
pub fn is_near_expiry(jwt: &str, buffer_secs: i64) -> bool {
    decode_expiry(jwt).is_ok_and(|expires_at| {
        expires_at <= Utc::now() + chrono::TimeDelta::seconds(buffer_secs)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_jwt_with_exp(exp: i64) -> String {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(r#"{"alg":"HS256"}"#);
        let payload = engine.encode(format!(r#"{{"sub":"user_123","exp":{exp}}}"#));
        let signature = engine.encode("fake_sig");
        format!("{header}.{payload}.{signature}")
    }

    #[test]
    fn decode_expiry_valid_jwt() {
        let future_exp = Utc::now().timestamp() + 3600;
        let dt = decode_expiry(&make_jwt_with_exp(future_exp)).expect("decode");
        assert_eq!(dt.timestamp(), future_exp);
        assert!(!is_near_expiry(&make_jwt_with_exp(future_exp), 60));
    }

    #[test]
    fn expired_token_is_near_expiry() {
        let past_exp = Utc::now().timestamp() - 3600;
        assert!(is_near_expiry(&make_jwt_with_exp(past_exp), 60));
    }

    #[test]
    fn opaque_token_is_not_expired() {
        assert!(!is_near_expiry("opaque-session-token", 60));
    }

    #[test]
    fn decode_expiry_invalid_format() {
        let err = decode_expiry("not-a-jwt").expect_err("should fail");
        assert!(err.to_string().contains("invalid JWT format"));
    }

    #[test]
    fn decode_expiry_missing_exp_claim() {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let jwt = format!(
            "{}.{}.{}",
            engine.encode(r#"{"alg":"HS256"}"#),
            engine.encode(r#"{"sub":"user_123"}"#),
            engine.encode("sig")
        );
        let err = decode_expiry(&jwt).expect_err("should fail");
        assert!(err.to_string().contains("missing exp claim"));
    }

    #[test]
    fn decode_expiry_bad_base64() {
        let err = decode_expiry("header.!!!invalid!!!.signature").expect_err("should fail");
        assert!(err.to_string().contains("base64 decode failed"));
    }
}
