//! Event-driven console shell state machine.
//!
//! Every event handler mutates the shell synchronously and returns the
//! effects the driver must run. The shell never awaits; suspension happens
//! only in the driver, between an effect and the event it produces.

use console_client::{
    ConsoleClientError, Organization, ProxyClientConfig, ProxySettings, Team, UiConfig,
};
use console_navigation::{BrowserWindow, NavigationRouter};
use console_session::{
    login_redirect_url, should_redirect_to_login, ConsoleRole, CredentialStore, RedirectInputs,
    SessionContext, SessionContextBuilder, SessionScope, SessionUpdate,
};
use serde_json::{json, Value};

use crate::{
    ConsolePage, EntityKind, EntityList, EntityMutation, MutationOrigin, MutationSink,
    NavbarProps, PanelInputs, PanelProps, ShellConfig, ShellError, SidebarProps,
    UserDashboardProps, USAGE_PAGE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One entity fetch for a resolved session scope.
pub struct FetchRequest {
    pub entity: EntityKind,
    pub generation: u64,
    pub scope: SessionScope,
    pub client: ProxyClientConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Work the driver performs on behalf of the shell.
pub enum ShellEffect {
    LoadUiConfig { client: ProxyClientConfig },
    /// Full-page navigation already issued on the browser window.
    Redirect { location: String },
    Fetch(FetchRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityPayload {
    Teams(Vec<Team>),
    Organizations(Vec<Organization>),
    UserModels(Vec<String>),
}

#[derive(Debug)]
/// Resolution of a [`FetchRequest`].
pub struct FetchOutcome {
    pub entity: EntityKind,
    pub generation: u64,
    pub result: Result<EntityPayload, ConsoleClientError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub navbar: NavbarProps,
    pub sidebar: SidebarProps,
    pub page: ConsolePage,
    pub panel: PanelProps,
    pub sso_banner_visible: bool,
    pub config_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// What the shell shows right now. Exactly one variant is active.
pub enum ShellView {
    Loading,
    Invitation {
        invitation_id: String,
        dashboard: UserDashboardProps,
        config_error: Option<String>,
    },
    Dashboard(Box<DashboardView>),
}

#[derive(Debug)]
/// Public struct `ConsoleShell` owning session, navigation and entity state for one tab.
pub struct ConsoleShell<B, C> {
    config: ShellConfig,
    builder: SessionContextBuilder,
    credentials: C,
    router: NavigationRouter<B>,
    session: SessionContext,
    session_token: Option<String>,
    auth_loading: bool,
    redirect_target: Option<String>,
    proxy_settings: ProxySettings,
    config_error: Option<String>,
    teams: EntityList<Team>,
    organizations: EntityList<Organization>,
    user_models: EntityList<String>,
    keys: Vec<Value>,
    model_data: Value,
    create_clicked: bool,
    fetch_generation: u64,
    fetched_scope: Option<SessionScope>,
    mutations: MutationSink,
}

impl<B: BrowserWindow, C: CredentialStore> ConsoleShell<B, C> {
    /// Reads the initial page from the browser; nothing else happens until [`Self::mount`].
    pub fn new(config: ShellConfig, browser: B, credentials: C) -> Self {
        let proxy_settings = ProxySettings {
            base_url: config.proxy_base_url.trim().trim_end_matches('/').to_string(),
            logout_url: String::new(),
        };
        Self {
            builder: SessionContextBuilder::new(config.decode_failure_policy),
            config,
            credentials,
            router: NavigationRouter::new(browser),
            session: SessionContext::default(),
            session_token: None,
            auth_loading: true,
            redirect_target: None,
            proxy_settings,
            config_error: None,
            teams: EntityList::Pending,
            organizations: EntityList::Pending,
            user_models: EntityList::Pending,
            keys: Vec::new(),
            model_data: json!({ "data": [] }),
            create_clicked: false,
            fetch_generation: 0,
            fetched_scope: None,
            mutations: MutationSink::default(),
        }
    }

    pub fn mount(&mut self) -> Vec<ShellEffect> {
        tracing::debug!(page = self.router.current_page(), "console shell mounted");
        vec![ShellEffect::LoadUiConfig {
            client: self
                .config
                .client_config(&self.config.proxy_base_url, None),
        }]
    }

    /// Completes auth loading: applies proxy settings, then reads and applies the session token.
    pub fn on_ui_config(
        &mut self,
        result: Result<UiConfig, ConsoleClientError>,
    ) -> Vec<ShellEffect> {
        let ui_config = match result {
            Ok(ui_config) => {
                self.config_error = None;
                ui_config
            }
            Err(error) => {
                let error = ShellError::ConfigLoad(error);
                tracing::warn!(%error, "continuing with default proxy settings");
                self.config_error = Some(error.to_string());
                UiConfig::default()
            }
        };
        self.proxy_settings = ProxySettings::from_ui_config(&ui_config, &self.config.proxy_base_url);
        self.auth_loading = false;

        let token = self.credentials.session_token();
        self.apply_session_token(token)
    }

    /// Applies a new session token (re-login or cookie change).
    pub fn set_token(&mut self, token: Option<&str>) -> Vec<ShellEffect> {
        self.apply_session_token(token.map(str::to_string))
    }

    /// Stores a fetch result. Results of an older generation still apply.
    pub fn on_fetch_complete(&mut self, outcome: FetchOutcome) -> Result<(), ShellError> {
        if outcome.generation != self.fetch_generation {
            tracing::debug!(
                entity = outcome.entity.as_str(),
                generation = outcome.generation,
                current = self.fetch_generation,
                "applying result of an older fetch generation"
            );
        }
        match outcome.result {
            Ok(EntityPayload::Teams(teams)) => self.teams = EntityList::Loaded(teams),
            Ok(EntityPayload::Organizations(organizations)) => {
                self.organizations = EntityList::Loaded(organizations)
            }
            Ok(EntityPayload::UserModels(models)) => self.user_models = EntityList::Loaded(models),
            Err(source) => {
                match outcome.entity {
                    EntityKind::Teams => self.teams = EntityList::Unavailable,
                    EntityKind::Organizations => self.organizations = EntityList::Unavailable,
                    EntityKind::UserModels => self.user_models = EntityList::Unavailable,
                }
                let error = ShellError::EntityFetch {
                    entity: outcome.entity,
                    source,
                };
                tracing::warn!(%error, "entity list unavailable");
                return Err(error);
            }
        }
        Ok(())
    }

    /// Sidebar selection: push a history entry and switch panels without reloading.
    pub fn navigate(&mut self, page: &str) {
        self.router.navigate(page);
    }

    /// Browser back/forward moved the location; follow it.
    pub fn on_history_pop(&mut self) {
        self.router.sync_from_location();
    }

    pub fn mutation_sink(&mut self) -> &mut MutationSink {
        &mut self.mutations
    }

    /// Applies a change requested by `origin` if its capability slice allows it.
    pub fn apply_mutation(
        &mut self,
        origin: MutationOrigin,
        mutation: EntityMutation,
    ) -> Result<Vec<ShellEffect>, ShellError> {
        let kind = mutation.kind();
        if !origin.permits(kind) {
            let error = ShellError::MutationRejected {
                origin: origin.label(),
                mutation: kind,
            };
            tracing::warn!(%error, "mutation rejected");
            return Err(error);
        }
        match mutation {
            EntityMutation::AddKey(row) => {
                self.keys.push(row);
                self.create_clicked = !self.create_clicked;
            }
            EntityMutation::SetKeys(keys) => self.keys = keys,
            EntityMutation::SetTeams(teams) => self.teams = EntityList::Loaded(teams),
            EntityMutation::SetOrganizations(organizations) => {
                self.organizations = EntityList::Loaded(organizations)
            }
            EntityMutation::SetUserRole(raw_role) => {
                self.session.role = ConsoleRole::normalize(Some(raw_role.as_str()))
            }
            EntityMutation::SetUserEmail(email) => self.session.user_email = email,
            EntityMutation::SetModelData(model_data) => self.model_data = model_data,
            EntityMutation::SetProxySettings(settings) => self.proxy_settings = settings,
        }
        tracing::debug!(
            origin = origin.label(),
            mutation = kind.as_str(),
            "mutation applied"
        );
        Ok(self.gate_fetches())
    }

    /// Applies every queued mutation in submission order.
    pub fn flush_mutations(&mut self) -> (Vec<ShellEffect>, Vec<ShellError>) {
        let mut effects = Vec::new();
        let mut errors = Vec::new();
        for (origin, mutation) in self.mutations.drain() {
            match self.apply_mutation(origin, mutation) {
                Ok(next) => effects.extend(next),
                Err(error) => errors.push(error),
            }
        }
        (effects, errors)
    }

    pub fn view(&self) -> ShellView {
        if self.auth_loading || self.redirect_target.is_some() {
            return ShellView::Loading;
        }
        let query = self.router.query_params();
        let inputs = PanelInputs {
            session: &self.session,
            session_token: self.session_token.as_deref(),
            teams: &self.teams,
            organizations: &self.organizations,
            user_models: &self.user_models,
            keys: &self.keys,
            model_data: &self.model_data,
            create_clicked: self.create_clicked,
            proxy_settings: &self.proxy_settings,
            query: &query,
        };
        if let Some(invitation_id) = self.invitation_id() {
            return ShellView::Invitation {
                invitation_id,
                dashboard: UserDashboardProps::from_inputs(&inputs),
                config_error: self.config_error.clone(),
            };
        }
        let page = self.active_panel();
        ShellView::Dashboard(Box::new(DashboardView {
            navbar: NavbarProps::from_inputs(&inputs),
            sidebar: SidebarProps::from_inputs(&inputs, self.router.current_page()),
            page,
            panel: PanelProps::for_page(page, &inputs),
            sso_banner_visible: self.session.sso_banner_visible,
            config_error: self.config_error.clone(),
        }))
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn current_page(&self) -> &str {
        self.router.current_page()
    }

    pub fn active_panel(&self) -> ConsolePage {
        ConsolePage::dispatch(self.router.current_page())
    }

    /// Non-empty `invitation_id` query parameter.
    pub fn invitation_id(&self) -> Option<String> {
        self.router.invitation_id().filter(|id| !id.is_empty())
    }

    pub fn is_auth_loading(&self) -> bool {
        self.auth_loading
    }

    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect_target.as_deref()
    }

    pub fn proxy_settings(&self) -> &ProxySettings {
        &self.proxy_settings
    }

    pub fn config_error(&self) -> Option<&str> {
        self.config_error.as_deref()
    }

    pub fn teams(&self) -> &EntityList<Team> {
        &self.teams
    }

    pub fn organizations(&self) -> &EntityList<Organization> {
        &self.organizations
    }

    pub fn user_models(&self) -> &EntityList<String> {
        &self.user_models
    }

    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    pub fn model_data(&self) -> &Value {
        &self.model_data
    }

    pub fn create_clicked(&self) -> bool {
        self.create_clicked
    }

    pub fn fetch_generation(&self) -> u64 {
        self.fetch_generation
    }

    pub fn router(&self) -> &NavigationRouter<B> {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut NavigationRouter<B> {
        &mut self.router
    }

    fn apply_session_token(&mut self, token: Option<String>) -> Vec<ShellEffect> {
        if token.is_some() && token == self.session_token {
            tracing::debug!("session token unchanged");
            return self.reconcile();
        }
        let update = self.builder.apply_token(&mut self.session, token.as_deref());
        self.session_token = if update.has_valid_token() {
            token
        } else {
            None
        };

        if let SessionUpdate::Applied {
            established_role: Some(role),
        } = update
        {
            tracing::info!(
                role = role.as_str(),
                version = self.session.version,
                "session established"
            );
            if role == ConsoleRole::AdminViewer {
                self.router.force_page(USAGE_PAGE);
            }
        }

        self.reconcile()
    }

    fn reconcile(&mut self) -> Vec<ShellEffect> {
        if let Some(redirect) = self.evaluate_redirect() {
            return vec![redirect];
        }
        self.gate_fetches()
    }

    fn evaluate_redirect(&mut self) -> Option<ShellEffect> {
        let inputs = RedirectInputs {
            auth_loading_complete: !self.auth_loading,
            session_token_present: self.session_token.is_some(),
            invitation_present: self.invitation_id().is_some(),
        };
        if !should_redirect_to_login(inputs) {
            self.redirect_target = None;
            return None;
        }
        let location = login_redirect_url(&self.proxy_settings.base_url);
        if self.redirect_target.as_deref() != Some(location.as_str()) {
            tracing::info!(location = location.as_str(), "redirecting to login");
            self.router.browser_mut().assign_location(&location);
            self.redirect_target = Some(location.clone());
        }
        Some(ShellEffect::Redirect { location })
    }

    fn gate_fetches(&mut self) -> Vec<ShellEffect> {
        if self.redirect_target.is_some() {
            return Vec::new();
        }
        let Some(scope) = self.session.fetch_scope() else {
            self.fetched_scope = None;
            return Vec::new();
        };
        if self.fetched_scope.as_ref() == Some(&scope) {
            return Vec::new();
        }

        self.fetch_generation += 1;
        self.fetched_scope = Some(scope.clone());
        let client = self.config.client_config(
            &self.proxy_settings.base_url,
            self.session.auth_header_override.as_deref(),
        );
        tracing::debug!(
            generation = self.fetch_generation,
            role = scope.role.as_str(),
            "entity fetches started"
        );
        EntityKind::ALL
            .iter()
            .map(|entity| {
                ShellEffect::Fetch(FetchRequest {
                    entity: *entity,
                    generation: self.fetch_generation,
                    scope: scope.clone(),
                    client: client.clone(),
                })
            })
            .collect()
    }
}
