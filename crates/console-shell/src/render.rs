//! Leptos SSR markup for the shell chrome and the active panel mount.

use leptos::prelude::*;

use crate::{
    ConsolePage, DashboardView, NavbarProps, PanelProps, ShellView, SidebarProps,
    UserDashboardProps,
};

pub fn render_console_shell(view: &ShellView) -> String {
    match view {
        ShellView::Loading => render_loading_screen(),
        ShellView::Invitation {
            invitation_id,
            dashboard,
            config_error,
        } => render_invitation_view(invitation_id, dashboard, config_error.as_deref()),
        ShellView::Dashboard(dashboard) => render_dashboard(dashboard),
    }
}

pub fn render_loading_screen() -> String {
    let shell = view! {
        <div id="console-shell" data-app="proxy-console" data-shell-state="loading">
            <section id="console-loading-screen" data-component="LoadingScreen" aria-busy="true">
                <p>Loading...</p>
            </section>
        </div>
    };
    shell.to_html()
}

/// Key management alone, without navbar or sidebar.
pub fn render_invitation_view(
    invitation_id: &str,
    dashboard: &UserDashboardProps,
    config_error: Option<&str>,
) -> String {
    let invitation_id = invitation_id.to_string();
    let banner = config_error_banner(config_error);
    let panel = panel_mount(
        ConsolePage::ApiKeys,
        &PanelProps::UserDashboard(dashboard.clone()),
    );
    let shell = view! {
        <div
            id="console-shell"
            data-app="proxy-console"
            data-shell-state="invitation"
            data-invitation-id=invitation_id
        >
            {banner}
            <main id="console-main">{panel}</main>
        </div>
    };
    shell.to_html()
}

pub fn render_dashboard(dashboard: &DashboardView) -> String {
    let active_page = dashboard.sidebar.selected_page.clone();
    let sso_banner = if dashboard.sso_banner_visible {
        "true"
    } else {
        "false"
    };
    let banner = config_error_banner(dashboard.config_error.as_deref());
    let navbar = navbar(&dashboard.navbar);
    let sidebar = sidebar(&dashboard.sidebar);
    let panel = panel_mount(dashboard.page, &dashboard.panel);
    let shell = view! {
        <div
            id="console-shell"
            data-app="proxy-console"
            data-shell-state="dashboard"
            data-active-page=active_page
            data-sso-banner=sso_banner
        >
            {banner}
            {navbar}
            <div id="console-layout">
                {sidebar}
                <main id="console-main">{panel}</main>
            </div>
        </div>
    };
    shell.to_html()
}

fn config_error_banner(config_error: Option<&str>) -> Option<impl IntoView> {
    config_error.map(|message| {
        let message = message.to_string();
        let message_attr = message.clone();
        view! {
            <div id="console-config-error" role="alert" data-config-error=message_attr>
                {message}
            </div>
        }
    })
}

fn navbar(props: &NavbarProps) -> impl IntoView {
    let user_id = props.user_id.clone().unwrap_or_default();
    let user_email = props.user_email.clone().unwrap_or_default();
    let user_email_text = user_email.clone();
    let role = props.role.as_str();
    let role_label = props.role.display_label();
    let premium = if props.premium_user { "true" } else { "false" };
    let public_page = if props.is_public_page { "true" } else { "false" };
    let authenticated = if props.access_token.is_some() {
        "true"
    } else {
        "false"
    };
    let proxy_base_url = props.proxy_settings.base_url.clone();
    let proxy_logout_url = props.proxy_settings.logout_url.clone();
    view! {
        <header
            id="console-navbar"
            data-component="Navbar"
            data-user-id=user_id
            data-user-role=role
            data-user-email=user_email
            data-premium-user=premium
            data-public-page=public_page
            data-authenticated=authenticated
            data-proxy-base-url=proxy_base_url
            data-proxy-logout-url=proxy_logout_url
        >
            <span id="console-navbar-role">{role_label}</span>
            <span id="console-navbar-email">{user_email_text}</span>
        </header>
    }
}

fn sidebar(props: &SidebarProps) -> impl IntoView {
    let selected_page = props.selected_page.clone();
    let role = props.role.as_str();
    let links = props.links.clone();
    let link_count = links.len().to_string();
    view! {
        <nav
            id="console-sidebar"
            data-component="Sidebar"
            data-selected-page=selected_page
            data-user-role=role
            data-nav-item-count=link_count
        >
            <ul>
                {links
                    .into_iter()
                    .map(|link| {
                        let selected = if link.selected { "true" } else { "false" };
                        view! {
                            <li>
                                <a
                                    data-nav-page=link.page.page_key()
                                    data-selected=selected
                                    href=link.href
                                >
                                    {link.page.sidebar_label()}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

fn panel_mount(page: ConsolePage, props: &PanelProps) -> impl IntoView {
    let rows = props.summary();
    let prop_count = rows.len().to_string();
    view! {
        <section
            id="console-panel"
            data-panel=page.page_key()
            data-component=page.component_name()
            data-prop-count=prop_count
        >
            <dl>
                {rows
                    .into_iter()
                    .map(|(name, value)| {
                        let value_text = value.clone();
                        view! {
                            <div data-prop=name data-prop-value=value>
                                <dt>{name}</dt>
                                <dd>{value_text}</dd>
                            </div>
                        }
                    })
                    .collect_view()}
            </dl>
        </section>
    }
}
