//! HTTP client for the proxy endpoints the console shell depends on.
//!
//! The auth header name is part of [`ProxyClientConfig`]; a session that
//! carries an `auth_header_name` claim gets a client built with that name.

mod client;
mod types;

pub use client::{
    ConsoleApi, ProxyClient, ProxyClientConfig, DEFAULT_AUTH_HEADER_NAME,
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_UI_CONFIG_PATH,
};
pub use types::{ConsoleClientError, Organization, ProxySettings, Team, UiConfig};
