//! Session context assembly from decoded token claims.
//!
//! Fields are applied independently: a claim that is absent from a newly
//! decoded token leaves the corresponding field as it was. The post-establish
//! hook (the role-forced landing page) is reported back to the caller instead
//! of being performed here.

use crate::{
    decode_session_token, ConsoleRole, SessionClaims, TokenDecodeError, PASSWORD_LOGIN_METHOD,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Trusted-by-assumption identity and scope facts for the current visitor.
pub struct SessionContext {
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub role: ConsoleRole,
    pub premium_user: bool,
    pub personal_key_creation_disabled: bool,
    pub sso_banner_visible: bool,
    pub auth_header_override: Option<String>,
    pub version: u64,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            access_token: None,
            user_id: None,
            user_email: None,
            role: ConsoleRole::Undefined,
            premium_user: false,
            personal_key_creation_disabled: false,
            sso_banner_visible: true,
            auth_header_override: None,
            version: 0,
        }
    }
}

impl SessionContext {
    /// Returns the entity-fetch scope once token, user id and role are all known.
    pub fn fetch_scope(&self) -> Option<SessionScope> {
        let access_token = self.access_token.as_deref().filter(|v| !v.is_empty())?;
        let user_id = self.user_id.as_deref().filter(|v| !v.is_empty())?;
        if !self.role.is_established() {
            return None;
        }
        Some(SessionScope {
            access_token: access_token.to_string(),
            user_id: user_id.to_string(),
            role: self.role,
        })
    }

    /// Applies the claims of one decoded token, following the claim order of the session bootstrap.
    pub fn apply_claims(&mut self, claims: &SessionClaims) -> Option<ConsoleRole> {
        if let Some(key) = &claims.key {
            self.access_token = Some(key.clone());
        }
        if let Some(disabled) = claims.disabled_non_admin_personal_key_creation {
            self.personal_key_creation_disabled = disabled;
        }

        let mut established_role = None;
        if let Some(raw_role) = claims.user_role.as_deref().filter(|role| !role.is_empty()) {
            let role = ConsoleRole::normalize(Some(raw_role));
            self.role = role;
            established_role = Some(role);
        }

        if let Some(email) = claims.user_email.as_deref().filter(|email| !email.is_empty()) {
            self.user_email = Some(email.to_string());
        }
        self.sso_banner_visible = claims.login_method.as_deref() == Some(PASSWORD_LOGIN_METHOD);
        if let Some(premium) = claims.premium_user {
            self.premium_user = premium;
        }
        if let Some(header) = claims
            .auth_header_name
            .as_deref()
            .filter(|header| !header.is_empty())
        {
            self.auth_header_override = Some(header.to_string());
        }
        if let Some(user_id) = claims.user_id.as_deref().filter(|id| !id.is_empty()) {
            self.user_id = Some(user_id.to_string());
        }

        self.version = self.version.saturating_add(1);
        established_role
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// The `(access_token, user_id, role)` triple that gates and scopes entity fetches.
pub struct SessionScope {
    pub access_token: String,
    pub user_id: String,
    pub role: ConsoleRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// What happens to previously established fields when a new token fails to decode.
pub enum DecodeFailurePolicy {
    #[default]
    RetainPrevious,
    ClearSession,
}

impl DecodeFailurePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RetainPrevious => "retain",
            Self::ClearSession => "clear",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "retain" | "retain-previous" => Some(Self::RetainPrevious),
            "clear" | "clear-session" => Some(Self::ClearSession),
            _ => None,
        }
    }
}

#[derive(Debug)]
/// Outcome of feeding one token value to the builder.
pub enum SessionUpdate {
    NoToken,
    DecodeFailed(TokenDecodeError),
    Applied {
        /// Set when the token carried a role claim; drives the post-establish hook.
        established_role: Option<ConsoleRole>,
    },
}

impl SessionUpdate {
    /// True when the token counts as present for the login redirect guard.
    pub fn has_valid_token(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Orchestrates decoding and claim application for each new token value.
pub struct SessionContextBuilder {
    policy: DecodeFailurePolicy,
}

impl SessionContextBuilder {
    pub fn new(policy: DecodeFailurePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DecodeFailurePolicy {
        self.policy
    }

    pub fn apply_token(&self, context: &mut SessionContext, token: Option<&str>) -> SessionUpdate {
        let Some(token) = token.filter(|token| !token.trim().is_empty()) else {
            tracing::debug!("no session token present; session context left unset");
            return SessionUpdate::NoToken;
        };

        match decode_session_token(token) {
            Ok(claims) => {
                let established_role = context.apply_claims(&claims);
                tracing::debug!(
                    version = context.version,
                    role = context.role.as_str(),
                    has_user_id = context.user_id.is_some(),
                    "session claims applied"
                );
                SessionUpdate::Applied { established_role }
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    policy = self.policy.as_str(),
                    "session token could not be decoded; treating visitor as unauthenticated"
                );
                if matches!(self.policy, DecodeFailurePolicy::ClearSession) {
                    let version = context.version;
                    *context = SessionContext {
                        version: version.saturating_add(1),
                        ..SessionContext::default()
                    };
                }
                SessionUpdate::DecodeFailed(error)
            }
        }
    }
}
