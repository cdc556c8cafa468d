use async_trait::async_trait;
use console_session::SessionScope;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value;

use crate::{ConsoleClientError, Organization, Team, UiConfig};

pub const DEFAULT_AUTH_HEADER_NAME: &str = "Authorization";
pub const DEFAULT_UI_CONFIG_PATH: &str = "/.well-known/litellm-ui-config";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public struct `ProxyClientConfig` describing how to reach the proxy.
pub struct ProxyClientConfig {
    pub base_url: String,
    /// Header that carries `Bearer <access token>`; proxies may rename it per deployment.
    pub auth_header_name: String,
    pub ui_config_path: String,
    pub request_timeout_ms: u64,
}

impl ProxyClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_header_name: DEFAULT_AUTH_HEADER_NAME.to_string(),
            ui_config_path: DEFAULT_UI_CONFIG_PATH.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    /// Applies the header name issued in the session token, if any.
    pub fn with_auth_header_override(mut self, header_name: Option<&str>) -> Self {
        if let Some(header_name) = header_name.map(str::trim).filter(|name| !name.is_empty()) {
            self.auth_header_name = header_name.to_string();
        }
        self
    }

    pub fn with_request_timeout_ms(mut self, request_timeout_ms: u64) -> Self {
        self.request_timeout_ms = request_timeout_ms;
        self
    }

    pub fn with_ui_config_path(mut self, ui_config_path: impl Into<String>) -> Self {
        self.ui_config_path = ui_config_path.into();
        self
    }
}

#[async_trait]
/// Trait contract for the proxy endpoints the console shell calls.
pub trait ConsoleApi: Send + Sync {
    async fn load_ui_config(&self) -> Result<UiConfig, ConsoleClientError>;

    async fn fetch_teams(&self, scope: &SessionScope) -> Result<Vec<Team>, ConsoleClientError>;

    async fn fetch_organizations(
        &self,
        scope: &SessionScope,
    ) -> Result<Vec<Organization>, ConsoleClientError>;

    /// Model ids the scoped user may call.
    async fn fetch_user_models(
        &self,
        scope: &SessionScope,
    ) -> Result<Vec<String>, ConsoleClientError>;
}

#[derive(Debug, Clone)]
/// `reqwest`-backed [`ConsoleApi`] implementation.
pub struct ProxyClient {
    client: reqwest::Client,
    config: ProxyClientConfig,
    auth_header: HeaderName,
}

impl ProxyClient {
    pub fn new(config: ProxyClientConfig) -> Result<Self, ConsoleClientError> {
        if config.base_url.trim().is_empty() {
            return Err(ConsoleClientError::MissingBaseUrl);
        }
        let auth_header = HeaderName::from_bytes(config.auth_header_name.trim().as_bytes())
            .map_err(|error| {
                ConsoleClientError::InvalidHeader(format!(
                    "auth header name '{}': {error}",
                    config.auth_header_name
                ))
            })?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;
        Ok(Self {
            client,
            config,
            auth_header,
        })
    }

    pub fn config(&self) -> &ProxyClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.config.base_url.trim().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        access_token: Option<&str>,
    ) -> Result<Value, ConsoleClientError> {
        let url = self.endpoint(path);
        let mut request = self.client.get(&url).query(query);
        if let Some(access_token) = access_token {
            let value = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|e| {
                ConsoleClientError::InvalidHeader(format!("invalid access token header: {e}"))
            })?;
            request = request.header(self.auth_header.clone(), value);
        }

        tracing::debug!(url = url.as_str(), "proxy request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ConsoleClientError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ConsoleApi for ProxyClient {
    async fn load_ui_config(&self) -> Result<UiConfig, ConsoleClientError> {
        let value = self.get_json(&self.config.ui_config_path, &[], None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn fetch_teams(&self, scope: &SessionScope) -> Result<Vec<Team>, ConsoleClientError> {
        let query: Vec<(&str, &str)> = if scope.role.is_admin_scope() {
            Vec::new()
        } else {
            vec![("user_id", scope.user_id.as_str())]
        };
        let value = self
            .get_json("/team/list", &query, Some(&scope.access_token))
            .await?;
        rows_from_listing(value, &["teams", "data"])
    }

    async fn fetch_organizations(
        &self,
        scope: &SessionScope,
    ) -> Result<Vec<Organization>, ConsoleClientError> {
        let value = self
            .get_json("/organization/list", &[], Some(&scope.access_token))
            .await?;
        rows_from_listing(value, &["organizations", "data"])
    }

    async fn fetch_user_models(
        &self,
        scope: &SessionScope,
    ) -> Result<Vec<String>, ConsoleClientError> {
        let value = self
            .get_json(
                "/models",
                &[("user_id", scope.user_id.as_str())],
                Some(&scope.access_token),
            )
            .await?;
        let rows: Vec<Value> = rows_from_listing(value, &["data"])?;
        rows.iter()
            .map(|row| {
                row.get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        ConsoleClientError::InvalidResponse("model row is missing 'id'".to_string())
                    })
            })
            .collect()
    }
}

/// Accepts either a bare JSON array or an object wrapping the array under one of `keys`.
fn rows_from_listing<T: serde::de::DeserializeOwned>(
    value: Value,
    keys: &[&str],
) -> Result<Vec<T>, ConsoleClientError> {
    let rows = match value {
        Value::Array(rows) => Value::Array(rows),
        Value::Object(mut object) => keys
            .iter()
            .find_map(|key| object.remove(*key).filter(Value::is_array))
            .ok_or_else(|| {
                ConsoleClientError::InvalidResponse(format!(
                    "listing has none of the expected keys: {}",
                    keys.join(", ")
                ))
            })?,
        other => {
            return Err(ConsoleClientError::InvalidResponse(format!(
                "listing is not an array or object: {other}"
            )))
        }
    };
    Ok(serde_json::from_value(rows)?)
}
