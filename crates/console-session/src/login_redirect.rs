/// Path on the proxy that starts the login / key-generation flow.
pub const LOGIN_REDIRECT_PATH: &str = "/sso/key/generate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Inputs of the login redirect decision.
pub struct RedirectInputs {
    pub auth_loading_complete: bool,
    /// A token that failed to decode counts as absent.
    pub session_token_present: bool,
    pub invitation_present: bool,
}

/// Returns true when the visitor must leave the console for the login flow.
pub fn should_redirect_to_login(inputs: RedirectInputs) -> bool {
    inputs.auth_loading_complete && !inputs.session_token_present && !inputs.invitation_present
}

/// Builds the full-page login target for `proxy_base_url`.
pub fn login_redirect_url(proxy_base_url: &str) -> String {
    format!(
        "{}{LOGIN_REDIRECT_PATH}",
        proxy_base_url.trim().trim_end_matches('/')
    )
}
