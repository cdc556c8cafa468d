use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Bootstrap configuration the proxy publishes for its admin UI.
pub struct UiConfig {
    #[serde(default)]
    pub proxy_base_url: Option<String>,
    #[serde(default)]
    pub proxy_logout_url: Option<String>,
    #[serde(default)]
    pub server_root_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Proxy endpoints the console links to; loaded once at bootstrap.
pub struct ProxySettings {
    pub base_url: String,
    pub logout_url: String,
}

impl ProxySettings {
    /// Resolves settings from a loaded UI config, keeping `fallback_base_url` when the proxy
    /// does not advertise its own base.
    pub fn from_ui_config(config: &UiConfig, fallback_base_url: &str) -> Self {
        let base_url = config
            .proxy_base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(fallback_base_url.trim())
            .trim_end_matches('/')
            .to_string();
        let logout_url = config
            .proxy_logout_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or_default()
            .to_string();
        Self {
            base_url,
            logout_url,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Team row as listed by the proxy. Fields the console does not read are kept in `extra`.
pub struct Team {
    pub team_id: String,
    #[serde(default)]
    pub team_alias: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Organization row as listed by the proxy.
pub struct Organization {
    pub organization_id: String,
    #[serde(default)]
    pub organization_alias: Option<String>,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Error)]
/// Enumerates supported `ConsoleClientError` values.
pub enum ConsoleClientError {
    #[error("proxy base url is empty")]
    MissingBaseUrl,
    #[error("invalid request header: {0}")]
    InvalidHeader(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("proxy returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
