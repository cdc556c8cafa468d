//! Session bootstrap primitives for the proxy console.
//!
//! Turns the proxy-issued `token` cookie into a typed [`SessionContext`]:
//! credential lookup, structural JWT decoding, role normalization, and the
//! login redirect decision.

pub mod credential_store;
pub mod login_redirect;
pub mod role;
pub mod session_context;
pub mod token;
#[cfg(feature = "web")]
pub mod web;

pub use credential_store::{CookieJar, CredentialStore, MemoryCredentialStore, SESSION_COOKIE_NAME};
pub use login_redirect::{
    login_redirect_url, should_redirect_to_login, RedirectInputs, LOGIN_REDIRECT_PATH,
};
pub use role::ConsoleRole;
pub use session_context::{
    DecodeFailurePolicy, SessionContext, SessionContextBuilder, SessionScope, SessionUpdate,
};
pub use token::{decode_session_token, SessionClaims, TokenDecodeError, PASSWORD_LOGIN_METHOD};
