//! Structural decoding of the session JWT payload.
//!
//! The proxy that sets the `token` cookie is the only authority on its
//! authenticity. Decoding here reads the embedded claims and performs no
//! signature verification and no expiry check.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// `login_method` claim value issued for username/password logins.
pub const PASSWORD_LOGIN_METHOD: &str = "username_password";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
/// Claims the console reads from the session token. Unknown claims are ignored.
pub struct SessionClaims {
    #[serde(default, deserialize_with = "lenient_claim")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient_claim")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_claim")]
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_claim")]
    pub user_role: Option<String>,
    #[serde(default, deserialize_with = "lenient_claim")]
    pub login_method: Option<String>,
    #[serde(default, deserialize_with = "lenient_claim")]
    pub premium_user: Option<bool>,
    #[serde(default, deserialize_with = "lenient_claim")]
    pub disabled_non_admin_personal_key_creation: Option<bool>,
    #[serde(default, deserialize_with = "lenient_claim")]
    pub auth_header_name: Option<String>,
}

#[derive(Debug, Error)]
/// Enumerates ways a session token can be structurally malformed.
pub enum TokenDecodeError {
    #[error("session token is empty")]
    Empty,
    #[error("session token has no payload segment")]
    MissingPayload,
    #[error("session token payload is not valid base64url: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("session token payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("session token payload is not a JSON object")]
    NotAnObject,
}

// A claim of the wrong JSON type reads as absent instead of failing the token.
fn lenient_claim<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Decodes the claims carried in `token` without contacting any server.
pub fn decode_session_token(token: &str) -> Result<SessionClaims, TokenDecodeError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenDecodeError::Empty);
    }
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenDecodeError::MissingPayload)?;

    let bytes = URL_SAFE_NO_PAD.decode(normalize_base64url(payload))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    if !value.is_object() {
        return Err(TokenDecodeError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

// Issuers differ on padding and alphabet; fold both onto unpadded base64url.
fn normalize_base64url(segment: &str) -> String {
    segment
        .trim_end_matches('=')
        .chars()
        .map(|ch| match ch {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}
