//! Total mapping from the `page` selector to the single active panel.

use crate::MutationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Feature panels the shell can mount. `Usage` is the fallback for unknown selectors.
pub enum ConsolePage {
    ApiKeys,
    Models,
    LlmPlayground,
    Users,
    Teams,
    Organizations,
    AdminPanel,
    ApiRef,
    Settings,
    Budgets,
    Guardrails,
    TransformRequest,
    GeneralSettings,
    ModelHubTable,
    Caching,
    PassThroughSettings,
    Logs,
    McpServers,
    TagManagement,
    VectorStores,
    NewUsage,
    Usage,
}

/// Ordered selector vocabulary. Lookup is exact and case-sensitive.
pub const PANEL_VOCABULARY: [(&str, ConsolePage); 21] = [
    ("api-keys", ConsolePage::ApiKeys),
    ("models", ConsolePage::Models),
    ("llm-playground", ConsolePage::LlmPlayground),
    ("users", ConsolePage::Users),
    ("teams", ConsolePage::Teams),
    ("organizations", ConsolePage::Organizations),
    ("admin-panel", ConsolePage::AdminPanel),
    ("api_ref", ConsolePage::ApiRef),
    ("settings", ConsolePage::Settings),
    ("budgets", ConsolePage::Budgets),
    ("guardrails", ConsolePage::Guardrails),
    ("transform-request", ConsolePage::TransformRequest),
    ("general-settings", ConsolePage::GeneralSettings),
    ("model-hub-table", ConsolePage::ModelHubTable),
    ("caching", ConsolePage::Caching),
    ("pass-through-settings", ConsolePage::PassThroughSettings),
    ("logs", ConsolePage::Logs),
    ("mcp-servers", ConsolePage::McpServers),
    ("tag-management", ConsolePage::TagManagement),
    ("vector-stores", ConsolePage::VectorStores),
    ("new_usage", ConsolePage::NewUsage),
];

/// Selector written by the role-forced landing hook; dispatches to the fallback panel.
pub const USAGE_PAGE: &str = "usage";

impl ConsolePage {
    /// Resolves a selector; never fails.
    pub fn dispatch(page: &str) -> Self {
        PANEL_VOCABULARY
            .iter()
            .find(|(key, _)| *key == page)
            .map(|(_, panel)| *panel)
            .unwrap_or(Self::Usage)
    }

    /// Selector that navigates to this panel.
    pub fn page_key(self) -> &'static str {
        PANEL_VOCABULARY
            .iter()
            .find(|(_, panel)| *panel == self)
            .map(|(key, _)| *key)
            .unwrap_or(USAGE_PAGE)
    }

    /// Name of the external panel component mounted for this page.
    pub fn component_name(self) -> &'static str {
        match self {
            Self::ApiKeys => "UserDashboard",
            Self::Models => "ModelDashboard",
            Self::LlmPlayground => "ChatUI",
            Self::Users => "ViewUserDashboard",
            Self::Teams => "Teams",
            Self::Organizations => "Organizations",
            Self::AdminPanel => "AdminPanel",
            Self::ApiRef => "APIRef",
            Self::Settings => "Settings",
            Self::Budgets => "BudgetPanel",
            Self::Guardrails => "GuardrailsPanel",
            Self::TransformRequest => "TransformRequestPanel",
            Self::GeneralSettings => "GeneralSettings",
            Self::ModelHubTable => "ModelHubTable",
            Self::Caching => "CacheDashboard",
            Self::PassThroughSettings => "PassThroughSettings",
            Self::Logs => "SpendLogsTable",
            Self::McpServers => "MCPServers",
            Self::TagManagement => "TagManagement",
            Self::VectorStores => "VectorStoreManagement",
            Self::NewUsage => "NewUsagePage",
            Self::Usage => "Usage",
        }
    }

    pub fn sidebar_label(self) -> &'static str {
        match self {
            Self::ApiKeys => "Virtual Keys",
            Self::Models => "Models",
            Self::LlmPlayground => "Test Key",
            Self::Users => "Internal Users",
            Self::Teams => "Teams",
            Self::Organizations => "Organizations",
            Self::AdminPanel => "Admin Settings",
            Self::ApiRef => "API Reference",
            Self::Settings => "Logging & Alerts",
            Self::Budgets => "Budgets",
            Self::Guardrails => "Guardrails",
            Self::TransformRequest => "API Playground",
            Self::GeneralSettings => "Router Settings",
            Self::ModelHubTable => "Model Hub",
            Self::Caching => "Caching",
            Self::PassThroughSettings => "Pass-Through",
            Self::Logs => "Logs",
            Self::McpServers => "MCP Servers",
            Self::TagManagement => "Tag Management",
            Self::VectorStores => "Vector Stores",
            Self::NewUsage => "New Usage",
            Self::Usage => "Usage",
        }
    }

    /// Entity changes this panel is allowed to request.
    pub fn permitted_mutations(self) -> &'static [MutationKind] {
        match self {
            Self::ApiKeys => &[
                MutationKind::AddKey,
                MutationKind::SetKeys,
                MutationKind::SetTeams,
                MutationKind::SetUserRole,
                MutationKind::SetUserEmail,
            ],
            Self::Models => &[MutationKind::SetModelData],
            Self::Users => &[MutationKind::SetKeys],
            Self::Teams | Self::AdminPanel => &[MutationKind::SetTeams],
            Self::Organizations => &[MutationKind::SetOrganizations],
            Self::LlmPlayground
            | Self::ApiRef
            | Self::Settings
            | Self::Budgets
            | Self::Guardrails
            | Self::TransformRequest
            | Self::GeneralSettings
            | Self::ModelHubTable
            | Self::Caching
            | Self::PassThroughSettings
            | Self::Logs
            | Self::McpServers
            | Self::TagManagement
            | Self::VectorStores
            | Self::NewUsage
            | Self::Usage => &[],
        }
    }
}
