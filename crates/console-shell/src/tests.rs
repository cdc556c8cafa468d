use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use console_client::{
    ConsoleApi, ConsoleClientError, Organization, ProxyClientConfig, ProxySettings, Team, UiConfig,
};
use console_navigation::{BrowserWindow, InMemoryBrowser};
use console_session::{ConsoleRole, DecodeFailurePolicy, MemoryCredentialStore, SessionScope};
use serde_json::{json, Value};

use super::{
    render_console_shell, render_loading_screen, ConsoleApiFactory, ConsolePage, ConsoleShell,
    EntityKind, EntityList, EntityMutation, EntityPayload, FetchOutcome, FetchRequest,
    MutationOrigin, PanelInputs, PanelProps, ShellConfig, ShellDriver, ShellEffect, ShellError,
    ShellView,
};

type TestShell = ConsoleShell<InMemoryBrowser, MemoryCredentialStore>;

fn session_token(claims: Value) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

fn internal_user_token() -> String {
    session_token(json!({
        "key": "sk-session",
        "user_id": "user-7",
        "user_email": "dev@example.com",
        "user_role": "internal_user",
        "login_method": "username_password",
        "premium_user": true
    }))
}

fn shell_with(search: &str, token: Option<String>) -> TestShell {
    let credentials = match token {
        Some(token) => MemoryCredentialStore::with_session_token(token),
        None => MemoryCredentialStore::default(),
    };
    ConsoleShell::new(
        ShellConfig::new("http://proxy.local:4000"),
        InMemoryBrowser::new(search),
        credentials,
    )
}

fn loaded_ui_config() -> Result<UiConfig, ConsoleClientError> {
    Ok(UiConfig {
        proxy_base_url: Some("https://proxy.example.com".to_string()),
        proxy_logout_url: Some("https://idp.example.com/logout".to_string()),
        server_root_path: None,
    })
}

fn fetches(effects: &[ShellEffect]) -> Vec<&FetchRequest> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            ShellEffect::Fetch(request) => Some(request),
            _ => None,
        })
        .collect()
}

fn bootstrap(shell: &mut TestShell) -> Vec<ShellEffect> {
    let effects = shell.mount();
    assert!(matches!(effects.as_slice(), [ShellEffect::LoadUiConfig { .. }]));
    shell.on_ui_config(loaded_ui_config())
}

#[test]
fn functional_mount_loads_ui_config_from_configured_base_and_shows_loading_screen() {
    let mut shell = shell_with("?page=teams", Some(internal_user_token()));
    let effects = shell.mount();
    match effects.as_slice() {
        [ShellEffect::LoadUiConfig { client }] => {
            assert_eq!(client.base_url, "http://proxy.local:4000");
            assert_eq!(client.auth_header_name, "Authorization");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
    assert!(shell.is_auth_loading());
    assert_eq!(shell.view(), ShellView::Loading);
    assert_eq!(shell.current_page(), "teams");
}

#[test]
fn functional_missing_token_redirects_to_login_once_auth_loading_completes() {
    let mut shell = shell_with("?page=models", None);
    let effects = bootstrap(&mut shell);
    assert_eq!(
        effects,
        vec![ShellEffect::Redirect {
            location: "https://proxy.example.com/sso/key/generate".to_string()
        }]
    );
    assert_eq!(
        shell.router().browser().assigned_locations(),
        ["https://proxy.example.com/sso/key/generate".to_string()]
    );
    assert_eq!(shell.view(), ShellView::Loading);
    assert!(render_console_shell(&shell.view()).contains("data-shell-state=\"loading\""));
}

#[test]
fn regression_repeated_redirect_evaluation_assigns_location_once() {
    let mut shell = shell_with("", None);
    bootstrap(&mut shell);
    let effects = shell.set_token(None);
    assert!(matches!(effects.as_slice(), [ShellEffect::Redirect { .. }]));
    assert_eq!(shell.router().browser().assigned_locations().len(), 1);
}

#[test]
fn functional_undecodable_token_counts_as_absent_for_redirect() {
    let mut shell = shell_with("", Some("not-a-jwt".to_string()));
    let effects = bootstrap(&mut shell);
    assert!(matches!(effects.as_slice(), [ShellEffect::Redirect { .. }]));
    assert_eq!(shell.session_token(), None);
}

#[test]
fn functional_invitation_mode_never_redirects_and_renders_key_management_alone() {
    let mut shell = shell_with("?invitation_id=inv-42&page=logs", None);
    let effects = bootstrap(&mut shell);
    assert!(effects.is_empty());
    assert!(shell.router().browser().assigned_locations().is_empty());

    let view = shell.view();
    let ShellView::Invitation { invitation_id, .. } = &view else {
        panic!("expected invitation view, got {view:?}");
    };
    assert_eq!(invitation_id, "inv-42");
    let html = render_console_shell(&view);
    assert!(html.contains("data-invitation-id=\"inv-42\""));
    assert!(html.contains("data-component=\"UserDashboard\""));
    assert!(!html.contains("id=\"console-navbar\""));
    assert!(!html.contains("id=\"console-sidebar\""));
}

#[test]
fn functional_complete_scope_starts_one_fetch_per_entity() {
    let mut shell = shell_with("", Some(internal_user_token()));
    let effects = bootstrap(&mut shell);
    let requests = fetches(&effects);
    assert_eq!(requests.len(), 3);
    let entities: Vec<EntityKind> = requests.iter().map(|request| request.entity).collect();
    assert_eq!(entities, EntityKind::ALL.to_vec());
    for request in &requests {
        assert_eq!(request.generation, 1);
        assert_eq!(
            request.scope,
            SessionScope {
                access_token: "sk-session".to_string(),
                user_id: "user-7".to_string(),
                role: ConsoleRole::InternalUser,
            }
        );
        assert_eq!(request.client.base_url, "https://proxy.example.com");
    }

    assert!(shell.set_token(Some(&internal_user_token())).is_empty());
    assert_eq!(shell.fetch_generation(), 1);
}

#[test]
fn functional_new_scope_after_relogin_starts_next_generation() {
    let mut shell = shell_with("", Some(internal_user_token()));
    bootstrap(&mut shell);
    let token = session_token(json!({ "key": "sk-other", "user_id": "user-8" }));
    let effects = shell.set_token(Some(&token));
    let requests = fetches(&effects);
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|request| request.generation == 2));
    assert_eq!(requests[0].scope.user_id, "user-8");
    assert_eq!(requests[0].scope.role, ConsoleRole::InternalUser);
}

#[test]
fn functional_incomplete_scope_does_not_fetch() {
    for claims in [
        json!({ "user_id": "user-7", "user_role": "proxy_admin" }),
        json!({ "key": "sk-session", "user_role": "proxy_admin" }),
        json!({ "key": "sk-session", "user_id": "user-7" }),
    ] {
        let mut shell = shell_with("", Some(session_token(claims.clone())));
        let effects = bootstrap(&mut shell);
        assert!(fetches(&effects).is_empty(), "{claims}");
        assert!(!shell.teams().is_loaded());
    }
}

#[test]
fn functional_admin_viewer_lands_on_usage_without_new_history_entry() {
    let token = session_token(json!({
        "key": "sk-session",
        "user_id": "viewer-1",
        "user_role": "proxy_admin_viewer"
    }));
    let mut shell = shell_with("?page=models&team_id=t-1", Some(token));
    bootstrap(&mut shell);
    assert_eq!(shell.current_page(), "usage");
    assert_eq!(shell.active_panel(), ConsolePage::Usage);
    let browser = shell.router().browser();
    assert_eq!(browser.history_len(), 1);
    assert_eq!(browser.location_search(), "?page=usage&team_id=t-1");

    shell.navigate("logs");
    assert_eq!(shell.active_panel(), ConsolePage::Logs);
}

#[test]
fn regression_reapplying_unchanged_token_keeps_user_selected_page() {
    let token = session_token(json!({
        "key": "sk-session",
        "user_id": "viewer-1",
        "user_role": "proxy_admin_viewer"
    }));
    let mut shell = shell_with("?page=models", Some(token.clone()));
    bootstrap(&mut shell);
    let version = shell.session().version;
    shell.navigate("logs");

    let effects = shell.set_token(Some(&token));
    assert!(effects.is_empty(), "{effects:?}");
    assert_eq!(shell.current_page(), "logs");
    assert_eq!(shell.session().version, version);
    assert_eq!(shell.fetch_generation(), 1);
}

#[test]
fn regression_mistyped_optional_claim_keeps_session_established() {
    let token = session_token(json!({
        "key": "sk-session",
        "user_id": "user-7",
        "user_role": "internal_user",
        "premium_user": "true",
        "disabled_non_admin_personal_key_creation": "false"
    }));
    let mut shell = shell_with("", Some(token));
    let effects = bootstrap(&mut shell);
    assert_eq!(fetches(&effects).len(), 3);
    assert!(shell.redirect_target().is_none());
    assert!(shell.session_token().is_some());
    assert!(!shell.session().premium_user);
}

#[test]
fn regression_padded_fallback_base_stays_trimmed_after_config_load() {
    let mut shell = ConsoleShell::new(
        ShellConfig::new("  http://proxy.local:4000/ "),
        InMemoryBrowser::new(""),
        MemoryCredentialStore::with_session_token(internal_user_token()),
    );
    assert_eq!(shell.proxy_settings().base_url, "http://proxy.local:4000");
    shell.mount();
    shell.on_ui_config(Ok(UiConfig::default()));
    assert_eq!(shell.proxy_settings().base_url, "http://proxy.local:4000");
}

#[test]
fn functional_auth_header_override_reaches_fetch_client_config() {
    let token = session_token(json!({
        "key": "sk-session",
        "user_id": "user-7",
        "user_role": "proxy_admin",
        "auth_header_name": "x-litellm-api-key"
    }));
    let mut shell = shell_with("", Some(token));
    let effects = bootstrap(&mut shell);
    let requests = fetches(&effects);
    assert_eq!(requests.len(), 3);
    assert!(requests
        .iter()
        .all(|request| request.client.auth_header_name == "x-litellm-api-key"));
}

#[test]
fn functional_fetch_results_apply_independently_in_any_order() {
    let mut shell = shell_with("?page=organizations", Some(internal_user_token()));
    bootstrap(&mut shell);
    shell
        .on_fetch_complete(FetchOutcome {
            entity: EntityKind::UserModels,
            generation: 1,
            result: Ok(EntityPayload::UserModels(vec!["gpt-4o".to_string()])),
        })
        .expect("models applied");
    assert_eq!(shell.user_models().as_slice(), ["gpt-4o".to_string()]);
    assert_eq!(shell.teams(), &EntityList::Pending);
    assert_eq!(shell.organizations(), &EntityList::Pending);

    let ShellView::Dashboard(view) = shell.view() else {
        panic!("expected dashboard");
    };
    let PanelProps::Organizations(props) = &view.panel else {
        panic!("expected organizations props");
    };
    assert!(props.organizations.is_empty());
    assert_eq!(props.user_models.len(), 1);
}

#[test]
fn regression_late_result_of_older_generation_overwrites_current_state() {
    let mut shell = shell_with("", Some(internal_user_token()));
    bootstrap(&mut shell);
    let token = session_token(json!({ "user_id": "user-8" }));
    shell.set_token(Some(&token));
    assert_eq!(shell.fetch_generation(), 2);

    let team = |id: &str| Team {
        team_id: id.to_string(),
        ..Team::default()
    };
    shell
        .on_fetch_complete(FetchOutcome {
            entity: EntityKind::Teams,
            generation: 2,
            result: Ok(EntityPayload::Teams(vec![team("current")])),
        })
        .expect("current generation");
    shell
        .on_fetch_complete(FetchOutcome {
            entity: EntityKind::Teams,
            generation: 1,
            result: Ok(EntityPayload::Teams(vec![team("stale")])),
        })
        .expect("older generation");
    assert_eq!(shell.teams().as_slice()[0].team_id, "stale");
}

#[test]
fn regression_fetch_failure_marks_only_that_list_unavailable() {
    let mut shell = shell_with("", Some(internal_user_token()));
    bootstrap(&mut shell);
    let error = shell
        .on_fetch_complete(FetchOutcome {
            entity: EntityKind::Organizations,
            generation: 1,
            result: Err(ConsoleClientError::HttpStatus {
                status: 500,
                body: "boom".to_string(),
            }),
        })
        .expect_err("failure surfaces");
    assert!(matches!(
        error,
        ShellError::EntityFetch {
            entity: EntityKind::Organizations,
            ..
        }
    ));
    assert_eq!(shell.organizations(), &EntityList::Unavailable);
    assert_eq!(shell.teams(), &EntityList::Pending);
    assert!(matches!(shell.view(), ShellView::Dashboard(_)));
}

#[test]
fn functional_config_load_failure_shows_banner_and_keeps_default_settings() {
    let mut shell = shell_with("", Some(internal_user_token()));
    shell.mount();
    let effects = shell.on_ui_config(Err(ConsoleClientError::HttpStatus {
        status: 404,
        body: "not found".to_string(),
    }));
    assert!(!shell.is_auth_loading());
    assert_eq!(fetches(&effects).len(), 3);
    assert_eq!(shell.proxy_settings().base_url, "http://proxy.local:4000");
    assert!(shell
        .config_error()
        .is_some_and(|message| message.contains("404")));

    let html = render_console_shell(&shell.view());
    assert!(html.contains("id=\"console-config-error\""));
    assert!(html.contains("data-shell-state=\"dashboard\""));
}

#[test]
fn functional_decode_failure_policy_controls_retained_fields() {
    let mut shell = shell_with("", Some(internal_user_token()));
    bootstrap(&mut shell);
    shell.set_token(Some("garbage"));
    assert_eq!(shell.session().user_id.as_deref(), Some("user-7"));

    let mut shell = ConsoleShell::new(
        ShellConfig::new("http://proxy.local:4000")
            .with_decode_failure_policy(DecodeFailurePolicy::ClearSession),
        InMemoryBrowser::new(""),
        MemoryCredentialStore::with_session_token(internal_user_token()),
    );
    bootstrap(&mut shell);
    shell.set_token(Some("garbage"));
    assert_eq!(shell.session().user_id, None);
    assert_eq!(shell.session().role, ConsoleRole::Undefined);
}

#[test]
fn functional_navigation_switches_panels_without_reload_and_follows_history() {
    let mut shell = shell_with("?page=teams", Some(internal_user_token()));
    bootstrap(&mut shell);
    assert_eq!(shell.active_panel(), ConsolePage::Teams);

    shell.navigate("budgets");
    assert_eq!(shell.active_panel(), ConsolePage::Budgets);
    assert_eq!(shell.router().browser().document_loads(), 1);

    assert!(shell.router_mut().browser_mut().back());
    shell.on_history_pop();
    assert_eq!(shell.current_page(), "teams");

    shell.navigate("no-such-panel");
    assert_eq!(shell.active_panel(), ConsolePage::Usage);
    assert_eq!(shell.current_page(), "no-such-panel");
}

#[test]
fn functional_mutations_follow_panel_capabilities() {
    let mut shell = shell_with("", Some(internal_user_token()));
    bootstrap(&mut shell);

    let key_panel = MutationOrigin::Panel(ConsolePage::ApiKeys);
    shell
        .apply_mutation(key_panel, EntityMutation::AddKey(json!({ "token": "k-1" })))
        .expect("add key");
    shell
        .apply_mutation(key_panel, EntityMutation::AddKey(json!({ "token": "k-2" })))
        .expect("add key");
    assert_eq!(shell.keys().len(), 2);
    assert!(!shell.create_clicked());

    let rejected = shell.apply_mutation(
        MutationOrigin::Panel(ConsolePage::Budgets),
        EntityMutation::SetKeys(Vec::new()),
    );
    assert!(matches!(rejected, Err(ShellError::MutationRejected { .. })));
    assert_eq!(shell.keys().len(), 2);

    let settings = ProxySettings {
        base_url: "https://other.example.com".to_string(),
        logout_url: String::new(),
    };
    shell
        .apply_mutation(
            MutationOrigin::Navbar,
            EntityMutation::SetProxySettings(settings.clone()),
        )
        .expect("navbar settings");
    assert_eq!(shell.proxy_settings(), &settings);
}

#[test]
fn functional_role_mutation_changes_scope_and_refetches() {
    let mut shell = shell_with("", Some(internal_user_token()));
    bootstrap(&mut shell);
    let effects = shell
        .apply_mutation(
            MutationOrigin::Panel(ConsolePage::ApiKeys),
            EntityMutation::SetUserRole("proxy_admin".to_string()),
        )
        .expect("role mutation");
    let requests = fetches(&effects);
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].scope.role, ConsoleRole::Admin);
}

#[test]
fn functional_queued_mutations_flush_in_submission_order() {
    let mut shell = shell_with("", Some(internal_user_token()));
    bootstrap(&mut shell);
    let sink = shell.mutation_sink();
    sink.submit(
        MutationOrigin::Panel(ConsolePage::Users),
        EntityMutation::SetKeys(vec![json!({ "token": "k-1" })]),
    );
    sink.submit(
        MutationOrigin::Panel(ConsolePage::Logs),
        EntityMutation::SetKeys(Vec::new()),
    );
    sink.submit(
        MutationOrigin::Panel(ConsolePage::Models),
        EntityMutation::SetModelData(json!({ "data": [{ "model_name": "gpt-4o" }] })),
    );
    let (_, errors) = shell.flush_mutations();
    assert_eq!(errors.len(), 1);
    assert_eq!(shell.keys().len(), 1);
    assert_eq!(shell.model_data()["data"][0]["model_name"], "gpt-4o");
    assert!(shell.mutation_sink().is_empty());
}

#[test]
fn unit_panel_props_pass_only_each_panels_slice() {
    let mut session = console_session::SessionContext::default();
    session.access_token = Some("sk-session".to_string());
    session.user_id = Some("user-7".to_string());
    session.role = ConsoleRole::Admin;
    let query = console_navigation::QueryParams::parse("?page=budgets");
    let settings = ProxySettings {
        base_url: "https://proxy.example.com".to_string(),
        logout_url: String::new(),
    };
    let teams = EntityList::Loaded(vec![Team::default()]);
    let pending: EntityList<Organization> = EntityList::Pending;
    let models: EntityList<String> = EntityList::Pending;
    let model_data = json!({ "data": [] });
    let inputs = PanelInputs {
        session: &session,
        session_token: Some("raw"),
        teams: &teams,
        organizations: &pending,
        user_models: &models,
        keys: &[],
        model_data: &model_data,
        create_clicked: false,
        proxy_settings: &settings,
        query: &query,
    };

    assert_eq!(
        PanelProps::for_page(ConsolePage::Budgets, &inputs),
        PanelProps::Budgets {
            access_token: Some("sk-session".to_string())
        }
    );
    assert_eq!(
        PanelProps::for_page(ConsolePage::ApiRef, &inputs),
        PanelProps::ApiRef {
            proxy_settings: settings.clone()
        }
    );
    let PanelProps::Teams(props) = PanelProps::for_page(ConsolePage::Teams, &inputs) else {
        panic!("teams props");
    };
    assert_eq!(props.teams.len(), 1);
    assert_eq!(props.role, ConsoleRole::Admin);
    let PanelProps::ModelHub(props) = PanelProps::for_page(ConsolePage::ModelHubTable, &inputs)
    else {
        panic!("model hub props");
    };
    assert!(!props.public_page);
}

#[test]
fn functional_dashboard_markup_marks_active_panel_and_sidebar_selection() {
    let mut shell = shell_with("?page=teams", Some(internal_user_token()));
    bootstrap(&mut shell);
    let html = render_console_shell(&shell.view());
    assert!(html.contains("data-panel=\"teams\""));
    assert!(html.contains("data-component=\"Teams\""));
    assert!(html.contains("data-nav-item-count=\"21\""));
    assert!(html.contains("data-selected-page=\"teams\""));
    assert!(html.contains("data-user-role=\"internal-user\""));
    assert!(html.contains("Internal User"));
    assert!(html.contains("data-sso-banner=\"true\""));
    assert!(!html.contains("sk-session"));
}

#[test]
fn unit_loading_screen_renders_only_the_loading_marker() {
    let html = render_loading_screen();
    assert!(html.contains("id=\"console-loading-screen\""));
    assert!(!html.contains("console-panel"));
}

#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<String>>,
    fail_organizations: bool,
}

#[async_trait]
impl ConsoleApi for RecordingApi {
    async fn load_ui_config(&self) -> Result<UiConfig, ConsoleClientError> {
        self.record("ui-config");
        loaded_ui_config()
    }

    async fn fetch_teams(&self, scope: &SessionScope) -> Result<Vec<Team>, ConsoleClientError> {
        self.record(&format!("teams:{}", scope.user_id));
        Ok(vec![Team {
            team_id: "t-1".to_string(),
            ..Team::default()
        }])
    }

    async fn fetch_organizations(
        &self,
        _scope: &SessionScope,
    ) -> Result<Vec<Organization>, ConsoleClientError> {
        self.record("organizations");
        if self.fail_organizations {
            return Err(ConsoleClientError::InvalidResponse("down".to_string()));
        }
        Ok(Vec::new())
    }

    async fn fetch_user_models(
        &self,
        _scope: &SessionScope,
    ) -> Result<Vec<String>, ConsoleClientError> {
        self.record("models");
        Ok(vec!["gpt-4o".to_string()])
    }
}

impl RecordingApi {
    fn record(&self, call: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.to_string());
        }
    }
}

struct SharedFactory {
    api: Arc<RecordingApi>,
    connected: Mutex<Vec<ProxyClientConfig>>,
}

impl ConsoleApiFactory for SharedFactory {
    fn connect(&self, config: &ProxyClientConfig) -> Result<Arc<dyn ConsoleApi>, ConsoleClientError> {
        if let Ok(mut connected) = self.connected.lock() {
            connected.push(config.clone());
        }
        Ok(self.api.clone())
    }
}

#[tokio::test]
async fn integration_driver_runs_bootstrap_to_completion_with_one_fetch_per_entity() {
    let api = Arc::new(RecordingApi {
        fail_organizations: true,
        ..RecordingApi::default()
    });
    let factory = SharedFactory {
        api: api.clone(),
        connected: Mutex::new(Vec::new()),
    };
    let driver = ShellDriver::new(factory);
    let mut shell = shell_with("?page=teams", Some(internal_user_token()));

    let report = driver.bootstrap(&mut shell).await;
    assert_eq!(report.redirect, None);
    assert_eq!(report.completed_fetches, 3);
    assert_eq!(report.errors.len(), 1);

    let mut calls = api.calls.lock().expect("calls").clone();
    assert_eq!(calls.remove(0), "ui-config");
    calls.sort();
    assert_eq!(calls, vec!["models", "organizations", "teams:user-7"]);

    assert_eq!(shell.teams().len(), 1);
    assert_eq!(shell.user_models().len(), 1);
    assert_eq!(shell.organizations(), &EntityList::Unavailable);
    let html = render_console_shell(&shell.view());
    assert!(html.contains("data-prop=\"organizations\" data-prop-value=\"unavailable\""));
    let connected = driver_connected_bases(&driver);
    assert_eq!(connected[0], "http://proxy.local:4000");
    assert!(connected[1..]
        .iter()
        .all(|base| base == "https://proxy.example.com"));
}

fn driver_connected_bases(driver: &ShellDriver<SharedFactory>) -> Vec<String> {
    driver
        .factory()
        .connected
        .lock()
        .expect("connected")
        .iter()
        .map(|config| config.base_url.clone())
        .collect()
}

#[tokio::test]
async fn integration_driver_reports_redirect_without_fetching() {
    let api = Arc::new(RecordingApi::default());
    let driver = ShellDriver::new(SharedFactory {
        api: api.clone(),
        connected: Mutex::new(Vec::new()),
    });
    let mut shell = shell_with("?page=logs", None);
    let report = driver.bootstrap(&mut shell).await;
    assert_eq!(
        report.redirect.as_deref(),
        Some("https://proxy.example.com/sso/key/generate")
    );
    assert_eq!(report.completed_fetches, 0);
    assert_eq!(api.calls.lock().expect("calls").len(), 1);
}
