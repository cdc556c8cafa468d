use console_client::{ProxyClientConfig, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_UI_CONFIG_PATH};
use console_session::DecodeFailurePolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Bootstrap settings for one console shell instance.
pub struct ShellConfig {
    /// Proxy base used for the UI-config load and whenever the proxy does not advertise one.
    pub proxy_base_url: String,
    pub decode_failure_policy: DecodeFailurePolicy,
    pub ui_config_path: String,
    pub request_timeout_ms: u64,
}

impl ShellConfig {
    pub fn new(proxy_base_url: impl Into<String>) -> Self {
        Self {
            proxy_base_url: proxy_base_url.into(),
            decode_failure_policy: DecodeFailurePolicy::default(),
            ui_config_path: DEFAULT_UI_CONFIG_PATH.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    pub fn with_decode_failure_policy(mut self, policy: DecodeFailurePolicy) -> Self {
        self.decode_failure_policy = policy;
        self
    }

    pub fn with_ui_config_path(mut self, ui_config_path: impl Into<String>) -> Self {
        self.ui_config_path = ui_config_path.into();
        self
    }

    pub fn with_request_timeout_ms(mut self, request_timeout_ms: u64) -> Self {
        self.request_timeout_ms = request_timeout_ms;
        self
    }

    /// Client settings for `base_url`, carrying the session's auth header override.
    pub fn client_config(
        &self,
        base_url: &str,
        auth_header_override: Option<&str>,
    ) -> ProxyClientConfig {
        ProxyClientConfig::new(base_url)
            .with_ui_config_path(self.ui_config_path.clone())
            .with_request_timeout_ms(self.request_timeout_ms)
            .with_auth_header_override(auth_header_override)
    }
}
