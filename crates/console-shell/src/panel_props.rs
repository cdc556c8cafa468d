//! Capability-narrowed inputs for each panel. A panel only sees the slice of
//! shell state listed in its props struct.

use console_client::{Organization, ProxySettings, Team};
use console_navigation::{QueryParams, PAGE_QUERY_PARAM};
use console_session::{ConsoleRole, SessionContext};
use serde_json::Value;

use crate::{ConsolePage, EntityList, PANEL_VOCABULARY};

#[derive(Debug, Clone, Copy)]
/// Borrowed view of shell state that props are narrowed from.
pub struct PanelInputs<'a> {
    pub session: &'a SessionContext,
    /// Raw session token as read from the credential store.
    pub session_token: Option<&'a str>,
    pub teams: &'a EntityList<Team>,
    pub organizations: &'a EntityList<Organization>,
    pub user_models: &'a EntityList<String>,
    pub keys: &'a [Value],
    pub model_data: &'a Value,
    pub create_clicked: bool,
    pub proxy_settings: &'a ProxySettings,
    pub query: &'a QueryParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserDashboardProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub premium_user: bool,
    pub teams: EntityList<Team>,
    pub keys: Vec<Value>,
    pub user_email: Option<String>,
    pub organizations: EntityList<Organization>,
    pub create_clicked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelDashboardProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub session_token: Option<String>,
    pub keys: Vec<Value>,
    pub access_token: Option<String>,
    pub model_data: Value,
    pub premium_user: bool,
    pub teams: EntityList<Team>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub session_token: Option<String>,
    pub access_token: Option<String>,
    pub personal_key_creation_disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsersProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub session_token: Option<String>,
    pub keys: Vec<Value>,
    pub teams: EntityList<Team>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamsProps {
    pub teams: EntityList<Team>,
    pub query: QueryParams,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub organizations: EntityList<Organization>,
    pub premium_user: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationsProps {
    pub organizations: EntityList<Organization>,
    pub user_models: EntityList<String>,
    pub access_token: Option<String>,
    pub role: ConsoleRole,
    pub premium_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPanelProps {
    pub query: QueryParams,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub sso_banner_visible: bool,
    pub premium_user: bool,
    pub proxy_settings: ProxySettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub access_token: Option<String>,
    pub premium_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachingProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub session_token: Option<String>,
    pub access_token: Option<String>,
    pub premium_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardrailsProps {
    pub access_token: Option<String>,
    pub role: ConsoleRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// MCP servers, tag management and vector stores.
pub struct ScopedAccessProps {
    pub access_token: Option<String>,
    pub role: ConsoleRole,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Router and pass-through settings panels.
pub struct ModelSettingsProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub access_token: Option<String>,
    pub model_data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHubProps {
    pub access_token: Option<String>,
    pub public_page: bool,
    pub premium_user: bool,
    pub role: ConsoleRole,
}

#[derive(Debug, Clone, PartialEq)]
/// Teams default to an empty list until loaded.
pub struct SpendLogsProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub session_token: Option<String>,
    pub access_token: Option<String>,
    pub teams: Vec<Team>,
    pub premium_user: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUsageProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub access_token: Option<String>,
    pub teams: Vec<Team>,
    pub premium_user: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub session_token: Option<String>,
    pub access_token: Option<String>,
    pub keys: Vec<Value>,
    pub premium_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarProps {
    pub user_id: Option<String>,
    pub role: ConsoleRole,
    pub premium_user: bool,
    pub user_email: Option<String>,
    pub proxy_settings: ProxySettings,
    pub access_token: Option<String>,
    pub is_public_page: bool,
}

impl NavbarProps {
    pub fn from_inputs(inputs: &PanelInputs<'_>) -> Self {
        Self {
            user_id: inputs.session.user_id.clone(),
            role: inputs.session.role,
            premium_user: inputs.session.premium_user,
            user_email: inputs.session.user_email.clone(),
            proxy_settings: inputs.proxy_settings.clone(),
            access_token: inputs.session.access_token.clone(),
            is_public_page: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLink {
    pub page: ConsolePage,
    /// Search string that selects `page` while keeping the other query parameters.
    pub href: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarProps {
    pub access_token: Option<String>,
    pub role: ConsoleRole,
    /// Raw selector, which may not name a vocabulary panel.
    pub selected_page: String,
    pub links: Vec<SidebarLink>,
}

impl SidebarProps {
    pub fn from_inputs(inputs: &PanelInputs<'_>, selected_page: &str) -> Self {
        let links = PANEL_VOCABULARY
            .iter()
            .map(|(key, page)| {
                let mut query = inputs.query.clone();
                query.set(PAGE_QUERY_PARAM, key);
                SidebarLink {
                    page: *page,
                    href: query.to_search(),
                    selected: *key == selected_page,
                }
            })
            .collect();
        Self {
            access_token: inputs.session.access_token.clone(),
            role: inputs.session.role,
            selected_page: selected_page.to_string(),
            links,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Props for exactly one panel.
pub enum PanelProps {
    UserDashboard(UserDashboardProps),
    ModelDashboard(ModelDashboardProps),
    Playground(PlaygroundProps),
    Users(UsersProps),
    Teams(TeamsProps),
    Organizations(OrganizationsProps),
    AdminPanel(AdminPanelProps),
    ApiRef { proxy_settings: ProxySettings },
    Settings(SettingsProps),
    Budgets { access_token: Option<String> },
    Guardrails(GuardrailsProps),
    TransformRequest { access_token: Option<String> },
    GeneralSettings(ModelSettingsProps),
    ModelHub(ModelHubProps),
    Caching(CachingProps),
    PassThroughSettings(ModelSettingsProps),
    Logs(SpendLogsProps),
    McpServers(ScopedAccessProps),
    TagManagement(ScopedAccessProps),
    VectorStores(ScopedAccessProps),
    NewUsage(NewUsageProps),
    Usage(UsageProps),
}

impl PanelProps {
    pub fn for_page(page: ConsolePage, inputs: &PanelInputs<'_>) -> Self {
        let session = inputs.session;
        let user_id = || session.user_id.clone();
        let access_token = || session.access_token.clone();
        let session_token = || inputs.session_token.map(str::to_string);
        let role = session.role;
        let premium_user = session.premium_user;

        match page {
            ConsolePage::ApiKeys => Self::UserDashboard(UserDashboardProps::from_inputs(inputs)),
            ConsolePage::Models => Self::ModelDashboard(ModelDashboardProps {
                user_id: user_id(),
                role,
                session_token: session_token(),
                keys: inputs.keys.to_vec(),
                access_token: access_token(),
                model_data: inputs.model_data.clone(),
                premium_user,
                teams: inputs.teams.clone(),
            }),
            ConsolePage::LlmPlayground => Self::Playground(PlaygroundProps {
                user_id: user_id(),
                role,
                session_token: session_token(),
                access_token: access_token(),
                personal_key_creation_disabled: session.personal_key_creation_disabled,
            }),
            ConsolePage::Users => Self::Users(UsersProps {
                user_id: user_id(),
                role,
                session_token: session_token(),
                keys: inputs.keys.to_vec(),
                teams: inputs.teams.clone(),
                access_token: access_token(),
            }),
            ConsolePage::Teams => Self::Teams(TeamsProps {
                teams: inputs.teams.clone(),
                query: inputs.query.clone(),
                access_token: access_token(),
                user_id: user_id(),
                role,
                organizations: inputs.organizations.clone(),
                premium_user,
            }),
            ConsolePage::Organizations => Self::Organizations(OrganizationsProps {
                organizations: inputs.organizations.clone(),
                user_models: inputs.user_models.clone(),
                access_token: access_token(),
                role,
                premium_user,
            }),
            ConsolePage::AdminPanel => Self::AdminPanel(AdminPanelProps {
                query: inputs.query.clone(),
                access_token: access_token(),
                user_id: user_id(),
                sso_banner_visible: session.sso_banner_visible,
                premium_user,
                proxy_settings: inputs.proxy_settings.clone(),
            }),
            ConsolePage::ApiRef => Self::ApiRef {
                proxy_settings: inputs.proxy_settings.clone(),
            },
            ConsolePage::Settings => Self::Settings(SettingsProps {
                user_id: user_id(),
                role,
                access_token: access_token(),
                premium_user,
            }),
            ConsolePage::Budgets => Self::Budgets {
                access_token: access_token(),
            },
            ConsolePage::Guardrails => Self::Guardrails(GuardrailsProps {
                access_token: access_token(),
                role,
            }),
            ConsolePage::TransformRequest => Self::TransformRequest {
                access_token: access_token(),
            },
            ConsolePage::GeneralSettings => Self::GeneralSettings(ModelSettingsProps {
                user_id: user_id(),
                role,
                access_token: access_token(),
                model_data: inputs.model_data.clone(),
            }),
            ConsolePage::ModelHubTable => Self::ModelHub(ModelHubProps {
                access_token: access_token(),
                public_page: false,
                premium_user,
                role,
            }),
            ConsolePage::Caching => Self::Caching(CachingProps {
                user_id: user_id(),
                role,
                session_token: session_token(),
                access_token: access_token(),
                premium_user,
            }),
            ConsolePage::PassThroughSettings => Self::PassThroughSettings(ModelSettingsProps {
                user_id: user_id(),
                role,
                access_token: access_token(),
                model_data: inputs.model_data.clone(),
            }),
            ConsolePage::Logs => Self::Logs(SpendLogsProps {
                user_id: user_id(),
                role,
                session_token: session_token(),
                access_token: access_token(),
                teams: inputs.teams.as_slice().to_vec(),
                premium_user,
            }),
            ConsolePage::McpServers => Self::McpServers(ScopedAccessProps {
                access_token: access_token(),
                role,
                user_id: user_id(),
            }),
            ConsolePage::TagManagement => Self::TagManagement(ScopedAccessProps {
                access_token: access_token(),
                role,
                user_id: user_id(),
            }),
            ConsolePage::VectorStores => Self::VectorStores(ScopedAccessProps {
                access_token: access_token(),
                role,
                user_id: user_id(),
            }),
            ConsolePage::NewUsage => Self::NewUsage(NewUsageProps {
                user_id: user_id(),
                role,
                access_token: access_token(),
                teams: inputs.teams.as_slice().to_vec(),
                premium_user,
            }),
            ConsolePage::Usage => Self::Usage(UsageProps {
                user_id: user_id(),
                role,
                session_token: session_token(),
                access_token: access_token(),
                keys: inputs.keys.to_vec(),
                premium_user,
            }),
        }
    }

    /// Prop names and rendered values, in declaration order, for the panel mount markup.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        match self {
            Self::UserDashboard(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_flag(&mut rows, "premium-user", props.premium_user);
                push_list(&mut rows, "teams", &props.teams);
                rows.push(("keys", props.keys.len().to_string()));
                push_opt(&mut rows, "user-email", &props.user_email);
                push_list(&mut rows, "organizations", &props.organizations);
                push_flag(&mut rows, "create-clicked", props.create_clicked);
            }
            Self::ModelDashboard(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_secret(&mut rows, "session-token", &props.session_token);
                rows.push(("keys", props.keys.len().to_string()));
                push_secret(&mut rows, "access-token", &props.access_token);
                rows.push(("model-data", model_row_count(&props.model_data)));
                push_flag(&mut rows, "premium-user", props.premium_user);
                push_list(&mut rows, "teams", &props.teams);
            }
            Self::Playground(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_secret(&mut rows, "session-token", &props.session_token);
                push_secret(&mut rows, "access-token", &props.access_token);
                push_flag(
                    &mut rows,
                    "personal-key-creation-disabled",
                    props.personal_key_creation_disabled,
                );
            }
            Self::Users(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_secret(&mut rows, "session-token", &props.session_token);
                rows.push(("keys", props.keys.len().to_string()));
                push_list(&mut rows, "teams", &props.teams);
                push_secret(&mut rows, "access-token", &props.access_token);
            }
            Self::Teams(props) => {
                push_list(&mut rows, "teams", &props.teams);
                rows.push(("search-params", props.query.to_query_string()));
                push_secret(&mut rows, "access-token", &props.access_token);
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_list(&mut rows, "organizations", &props.organizations);
                push_flag(&mut rows, "premium-user", props.premium_user);
            }
            Self::Organizations(props) => {
                push_list(&mut rows, "organizations", &props.organizations);
                push_list(&mut rows, "user-models", &props.user_models);
                push_secret(&mut rows, "access-token", &props.access_token);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_flag(&mut rows, "premium-user", props.premium_user);
            }
            Self::AdminPanel(props) => {
                rows.push(("search-params", props.query.to_query_string()));
                push_secret(&mut rows, "access-token", &props.access_token);
                push_opt(&mut rows, "user-id", &props.user_id);
                push_flag(&mut rows, "show-sso-banner", props.sso_banner_visible);
                push_flag(&mut rows, "premium-user", props.premium_user);
                rows.push(("proxy-base-url", props.proxy_settings.base_url.clone()));
            }
            Self::ApiRef { proxy_settings } => {
                rows.push(("proxy-base-url", proxy_settings.base_url.clone()));
                rows.push(("proxy-logout-url", proxy_settings.logout_url.clone()));
            }
            Self::Settings(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_secret(&mut rows, "access-token", &props.access_token);
                push_flag(&mut rows, "premium-user", props.premium_user);
            }
            Self::Caching(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_secret(&mut rows, "session-token", &props.session_token);
                push_secret(&mut rows, "access-token", &props.access_token);
                push_flag(&mut rows, "premium-user", props.premium_user);
            }
            Self::Budgets { access_token } | Self::TransformRequest { access_token } => {
                push_secret(&mut rows, "access-token", access_token);
            }
            Self::Guardrails(props) => {
                push_secret(&mut rows, "access-token", &props.access_token);
                rows.push(("user-role", props.role.as_str().to_string()));
            }
            Self::McpServers(props)
            | Self::TagManagement(props)
            | Self::VectorStores(props) => {
                push_secret(&mut rows, "access-token", &props.access_token);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_opt(&mut rows, "user-id", &props.user_id);
            }
            Self::GeneralSettings(props) | Self::PassThroughSettings(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_secret(&mut rows, "access-token", &props.access_token);
                rows.push(("model-data", model_row_count(&props.model_data)));
            }
            Self::ModelHub(props) => {
                push_secret(&mut rows, "access-token", &props.access_token);
                push_flag(&mut rows, "public-page", props.public_page);
                push_flag(&mut rows, "premium-user", props.premium_user);
                rows.push(("user-role", props.role.as_str().to_string()));
            }
            Self::Logs(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_secret(&mut rows, "session-token", &props.session_token);
                push_secret(&mut rows, "access-token", &props.access_token);
                rows.push(("teams", props.teams.len().to_string()));
                push_flag(&mut rows, "premium-user", props.premium_user);
            }
            Self::NewUsage(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_secret(&mut rows, "access-token", &props.access_token);
                rows.push(("teams", props.teams.len().to_string()));
                push_flag(&mut rows, "premium-user", props.premium_user);
            }
            Self::Usage(props) => {
                push_opt(&mut rows, "user-id", &props.user_id);
                rows.push(("user-role", props.role.as_str().to_string()));
                push_secret(&mut rows, "session-token", &props.session_token);
                push_secret(&mut rows, "access-token", &props.access_token);
                rows.push(("keys", props.keys.len().to_string()));
                push_flag(&mut rows, "premium-user", props.premium_user);
            }
        }
        rows
    }
}

impl UserDashboardProps {
    /// Also mounted alone in invitation mode.
    pub fn from_inputs(inputs: &PanelInputs<'_>) -> Self {
        Self {
            user_id: inputs.session.user_id.clone(),
            role: inputs.session.role,
            premium_user: inputs.session.premium_user,
            teams: inputs.teams.clone(),
            keys: inputs.keys.to_vec(),
            user_email: inputs.session.user_email.clone(),
            organizations: inputs.organizations.clone(),
            create_clicked: inputs.create_clicked,
        }
    }
}

fn push_opt(rows: &mut Vec<(&'static str, String)>, name: &'static str, value: &Option<String>) {
    rows.push((name, value.clone().unwrap_or_default()));
}

// Credentials are never written into markup; only their presence is.
fn push_secret(rows: &mut Vec<(&'static str, String)>, name: &'static str, value: &Option<String>) {
    let state = if value.is_some() { "present" } else { "absent" };
    rows.push((name, state.to_string()));
}

fn push_flag(rows: &mut Vec<(&'static str, String)>, name: &'static str, value: bool) {
    rows.push((name, value.to_string()));
}

fn push_list<T>(rows: &mut Vec<(&'static str, String)>, name: &'static str, list: &EntityList<T>) {
    let value = match list {
        EntityList::Loaded(items) => items.len().to_string(),
        EntityList::Pending | EntityList::Unavailable => list.state_str().to_string(),
    };
    rows.push((name, value));
}

fn model_row_count(model_data: &Value) -> String {
    model_data
        .get("data")
        .and_then(Value::as_array)
        .map(|rows| rows.len())
        .unwrap_or_default()
        .to_string()
}
