use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use console_navigation::{BrowserWindow, InMemoryBrowser};
use console_session::{ConsoleRole, CookieJar};
use console_shell::{
    render_console_shell, ConsolePage, ConsoleShell, EntityList, ProxyClientFactory, ShellConfig,
    ShellDriver, ShellView,
};
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

fn session_cookie(claims: Value) -> String {
    format!(
        "token={}.{}.unsigned",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

fn console(base_url: &str, search: &str, cookie: &str) -> ConsoleShell<InMemoryBrowser, CookieJar> {
    ConsoleShell::new(
        ShellConfig::new(base_url),
        InMemoryBrowser::new(search),
        CookieJar::parse(cookie),
    )
}

struct ProxyMocks<'a> {
    ui_config: Mock<'a>,
    teams: Mock<'a>,
    organizations: Mock<'a>,
    models: Mock<'a>,
}

fn mock_proxy<'a>(server: &'a MockServer, header: &'static str, token: &'static str) -> ProxyMocks<'a> {
    let bearer = format!("Bearer {token}");
    let ui_config = server.mock(|when, then| {
        when.method(GET).path("/.well-known/litellm-ui-config");
        then.status(200).json_body(json!({
            "proxy_base_url": server.base_url(),
            "proxy_logout_url": "https://idp.example.com/logout"
        }));
    });
    let teams = server.mock(|when, then| {
        when.method(GET).path("/team/list").header(header, bearer.as_str());
        then.status(200)
            .json_body(json!([{ "team_id": "t-1", "team_alias": "platform" }]));
    });
    let organizations = server.mock(|when, then| {
        when.method(GET)
            .path("/organization/list")
            .header(header, bearer.as_str());
        then.status(200)
            .json_body(json!([{ "organization_id": "org-1" }]));
    });
    let models = server.mock(|when, then| {
        when.method(GET).path("/models").header(header, bearer.as_str());
        then.status(200)
            .json_body(json!({ "data": [{ "id": "gpt-4o" }, { "id": "o3-mini" }] }));
    });
    ProxyMocks {
        ui_config,
        teams,
        organizations,
        models,
    }
}

#[tokio::test]
async fn conformance_visit_without_session_cookie_leaves_for_login() {
    let server = MockServer::start();
    let mocks = mock_proxy(&server, "authorization", "sk-none");
    let mut shell = console(&server.base_url(), "?page=models", "theme=dark");

    let report = ShellDriver::new(ProxyClientFactory)
        .bootstrap(&mut shell)
        .await;
    let login = format!("{}/sso/key/generate", server.base_url());
    assert_eq!(report.redirect.as_deref(), Some(login.as_str()));
    assert_eq!(shell.router().browser().assigned_locations(), [login]);
    assert_eq!(mocks.ui_config.calls(), 1);
    assert_eq!(mocks.teams.calls(), 0);
    assert_eq!(shell.view(), ShellView::Loading);
}

#[tokio::test]
async fn conformance_session_bootstrap_fetches_each_entity_once_and_renders_panel() {
    let server = MockServer::start();
    let mocks = mock_proxy(&server, "authorization", "sk-session");
    let cookie = session_cookie(json!({
        "key": "sk-session",
        "user_id": "user-7",
        "user_email": "dev@example.com",
        "user_role": "internal_user",
        "login_method": "sso"
    }));
    let mut shell = console(&server.base_url(), "?page=organizations", &cookie);

    let report = ShellDriver::new(ProxyClientFactory)
        .bootstrap(&mut shell)
        .await;
    assert!(report.redirect.is_none());
    assert!(report.errors.is_empty());
    assert_eq!(mocks.teams.calls(), 1);
    assert_eq!(mocks.organizations.calls(), 1);
    assert_eq!(mocks.models.calls(), 1);

    assert_eq!(shell.session().role, ConsoleRole::InternalUser);
    assert!(!shell.session().sso_banner_visible);
    assert_eq!(shell.active_panel(), ConsolePage::Organizations);
    assert_eq!(
        shell.proxy_settings().logout_url,
        "https://idp.example.com/logout"
    );
    let html = render_console_shell(&shell.view());
    assert!(html.contains("data-panel=\"organizations\""));
    assert!(html.contains("data-prop=\"user-models\" data-prop-value=\"2\""));
    assert!(html.contains("data-sso-banner=\"false\""));
}

#[tokio::test]
async fn integration_auth_header_override_is_sent_on_every_entity_fetch() {
    let server = MockServer::start();
    let mocks = mock_proxy(&server, "x-litellm-api-key", "sk-session");
    let cookie = session_cookie(json!({
        "key": "sk-session",
        "user_id": "admin-1",
        "user_role": "proxy_admin",
        "auth_header_name": "x-litellm-api-key"
    }));
    let mut shell = console(&server.base_url(), "", &cookie);

    let report = ShellDriver::new(ProxyClientFactory)
        .bootstrap(&mut shell)
        .await;
    assert!(report.errors.is_empty(), "{:?}", report.errors);
    assert_eq!(mocks.teams.calls(), 1);
    assert_eq!(mocks.organizations.calls(), 1);
    assert_eq!(mocks.models.calls(), 1);
    assert_eq!(shell.teams().len(), 1);
}

#[tokio::test]
async fn conformance_admin_viewer_lands_on_usage_and_can_navigate_away() {
    let server = MockServer::start();
    mock_proxy(&server, "authorization", "sk-viewer");
    let cookie = session_cookie(json!({
        "key": "sk-viewer",
        "user_id": "viewer-1",
        "user_role": "proxy_admin_viewer"
    }));
    let mut shell = console(&server.base_url(), "?page=models", &cookie);

    ShellDriver::new(ProxyClientFactory)
        .bootstrap(&mut shell)
        .await;
    assert_eq!(shell.router().browser().location_search(), "?page=usage");
    assert_eq!(shell.active_panel(), ConsolePage::Usage);

    shell.navigate("logs");
    assert_eq!(shell.active_panel(), ConsolePage::Logs);
    assert_eq!(shell.router().browser().history_len(), 2);
    assert_eq!(shell.router().browser().document_loads(), 1);
}

#[tokio::test]
async fn regression_unreachable_config_and_failed_fetch_degrade_without_blocking() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/.well-known/litellm-ui-config");
        then.status(503).body("warming up");
    });
    server.mock(|when, then| {
        when.method(GET).path("/team/list");
        then.status(500).body("db down");
    });
    server.mock(|when, then| {
        when.method(GET).path("/organization/list");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/models");
        then.status(200).json_body(json!({ "data": [] }));
    });
    let cookie = session_cookie(json!({
        "key": "sk-session",
        "user_id": "user-7",
        "user_role": "app_user"
    }));
    let mut shell = console(&server.base_url(), "?invitation_id=inv-1", &cookie);

    let report = ShellDriver::new(ProxyClientFactory)
        .bootstrap(&mut shell)
        .await;
    assert_eq!(report.errors.len(), 1);
    assert!(!shell.is_auth_loading());
    assert_eq!(shell.teams(), &EntityList::Unavailable);
    assert!(shell.organizations().is_loaded());

    let view = shell.view();
    assert!(matches!(view, ShellView::Invitation { .. }));
    let html = render_console_shell(&view);
    assert!(html.contains("id=\"console-config-error\""));
    assert!(html.contains("data-shell-state=\"invitation\""));
}

#[tokio::test]
async fn functional_relogin_refetches_for_the_new_scope_only() {
    let server = MockServer::start();
    let first = mock_proxy(&server, "authorization", "sk-first");
    let cookie = session_cookie(json!({
        "key": "sk-first",
        "user_id": "user-7",
        "user_role": "internal_user"
    }));
    let mut shell = console(&server.base_url(), "", &cookie);
    let driver = ShellDriver::new(ProxyClientFactory);
    driver.bootstrap(&mut shell).await;
    assert_eq!(first.teams.calls(), 1);

    let second = mock_proxy(&server, "authorization", "sk-second");
    let token = session_cookie(json!({ "key": "sk-second" }));
    let token = token.trim_start_matches("token=");
    let effects = shell.set_token(Some(token));
    let report = driver.drive(&mut shell, effects).await;
    assert_eq!(report.completed_fetches, 3);
    assert_eq!(second.teams.calls(), 1);
    assert_eq!(first.teams.calls(), 1);
    assert_eq!(shell.fetch_generation(), 2);
}
