use anyhow::{bail, Result};
use console_navigation::InMemoryBrowser;
use console_session::CookieJar;
use console_shell::{
    render_console_shell, ConsoleApiFactory, ConsoleShell, ShellConfig, ShellDriver,
};

use crate::cli_args::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of one command-line bootstrap.
pub(crate) enum BootstrapOutput {
    Redirect(String),
    Html(String),
}

impl BootstrapOutput {
    pub(crate) fn render(&self) -> String {
        match self {
            Self::Redirect(location) => format!("redirect: {location}"),
            Self::Html(html) => html.clone(),
        }
    }
}

pub(crate) fn shell_config_from_cli(cli: &Cli) -> Result<ShellConfig> {
    if cli.proxy_base_url.trim().is_empty() {
        bail!("--proxy-base-url must not be empty");
    }
    Ok(ShellConfig::new(cli.proxy_base_url.trim())
        .with_decode_failure_policy(cli.decode_failure_policy)
        .with_ui_config_path(cli.ui_config_path.clone())
        .with_request_timeout_ms(cli.request_timeout_ms))
}

pub(crate) async fn run_bootstrap<F: ConsoleApiFactory>(
    cli: &Cli,
    factory: F,
) -> Result<BootstrapOutput> {
    let config = shell_config_from_cli(cli)?;
    let cookies = CookieJar::parse(cli.cookie.as_deref().unwrap_or_default());
    let browser = InMemoryBrowser::new(cli.location_search.clone());
    let mut shell = ConsoleShell::new(config, browser, cookies);

    let driver = ShellDriver::new(factory);
    let report = driver.bootstrap(&mut shell).await;
    for error in &report.errors {
        tracing::warn!(%error, "bootstrap completed with a degraded entity list");
    }
    tracing::debug!(
        fetches = report.completed_fetches,
        page = shell.current_page(),
        "bootstrap finished"
    );

    if let Some(location) = report.redirect {
        return Ok(BootstrapOutput::Redirect(location));
    }
    Ok(BootstrapOutput::Html(render_console_shell(&shell.view())))
}
