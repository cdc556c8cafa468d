//! Single-task executor for [`ShellEffect`]s.
//!
//! All in-flight requests are polled from one `FuturesUnordered` on the
//! caller's task; results are fed back to the shell in completion order.

use std::sync::Arc;

use console_client::{ConsoleApi, ConsoleClientError, ProxyClient, ProxyClientConfig, UiConfig};
use console_navigation::BrowserWindow;
use console_session::CredentialStore;
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;

use crate::{
    ConsoleShell, EntityKind, EntityPayload, FetchOutcome, FetchRequest, ShellEffect, ShellError,
};

/// Trait contract for building a [`ConsoleApi`] from client settings.
pub trait ConsoleApiFactory {
    fn connect(&self, config: &ProxyClientConfig) -> Result<Arc<dyn ConsoleApi>, ConsoleClientError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Builds `reqwest`-backed [`ProxyClient`]s.
pub struct ProxyClientFactory;

impl ConsoleApiFactory for ProxyClientFactory {
    fn connect(&self, config: &ProxyClientConfig) -> Result<Arc<dyn ConsoleApi>, ConsoleClientError> {
        Ok(Arc::new(ProxyClient::new(config.clone())?))
    }
}

#[derive(Debug, Default)]
/// What happened while a batch of effects ran to completion.
pub struct DriverReport {
    pub redirect: Option<String>,
    pub completed_fetches: usize,
    pub errors: Vec<ShellError>,
}

enum DriverEvent {
    UiConfig(Result<UiConfig, ConsoleClientError>),
    Fetch(FetchOutcome),
}

pub struct ShellDriver<F> {
    factory: F,
}

impl<F: ConsoleApiFactory> ShellDriver<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Mounts the shell and runs the bootstrap until no request is in flight.
    pub async fn bootstrap<B, C>(&self, shell: &mut ConsoleShell<B, C>) -> DriverReport
    where
        B: BrowserWindow,
        C: CredentialStore,
    {
        let effects = shell.mount();
        self.drive(shell, effects).await
    }

    /// Runs `effects` and every effect they lead to.
    pub async fn drive<B, C>(
        &self,
        shell: &mut ConsoleShell<B, C>,
        effects: Vec<ShellEffect>,
    ) -> DriverReport
    where
        B: BrowserWindow,
        C: CredentialStore,
    {
        let mut report = DriverReport::default();
        let mut in_flight: FuturesUnordered<BoxFuture<'static, DriverEvent>> =
            FuturesUnordered::new();
        let mut ready = Vec::new();
        self.dispatch(effects, &mut in_flight, &mut ready, &mut report);

        loop {
            let event = match ready.pop() {
                Some(event) => event,
                None => match in_flight.next().await {
                    Some(event) => event,
                    None => break,
                },
            };
            let effects = match event {
                DriverEvent::UiConfig(result) => shell.on_ui_config(result),
                DriverEvent::Fetch(outcome) => {
                    report.completed_fetches += 1;
                    if let Err(error) = shell.on_fetch_complete(outcome) {
                        report.errors.push(error);
                    }
                    Vec::new()
                }
            };
            self.dispatch(effects, &mut in_flight, &mut ready, &mut report);
        }
        report
    }

    fn dispatch(
        &self,
        effects: Vec<ShellEffect>,
        in_flight: &mut FuturesUnordered<BoxFuture<'static, DriverEvent>>,
        ready: &mut Vec<DriverEvent>,
        report: &mut DriverReport,
    ) {
        for effect in effects {
            match effect {
                ShellEffect::LoadUiConfig { client } => match self.factory.connect(&client) {
                    Ok(api) => in_flight.push(
                        async move { DriverEvent::UiConfig(api.load_ui_config().await) }.boxed(),
                    ),
                    Err(error) => ready.push(DriverEvent::UiConfig(Err(error))),
                },
                ShellEffect::Redirect { location } => {
                    tracing::debug!(location = location.as_str(), "bootstrap ended in redirect");
                    report.redirect = Some(location);
                }
                ShellEffect::Fetch(request) => match self.factory.connect(&request.client) {
                    Ok(api) => in_flight.push(run_fetch(api, request).boxed()),
                    Err(error) => ready.push(DriverEvent::Fetch(FetchOutcome {
                        entity: request.entity,
                        generation: request.generation,
                        result: Err(error),
                    })),
                },
            }
        }
    }
}

async fn run_fetch(api: Arc<dyn ConsoleApi>, request: FetchRequest) -> DriverEvent {
    let result = match request.entity {
        EntityKind::Teams => api
            .fetch_teams(&request.scope)
            .await
            .map(EntityPayload::Teams),
        EntityKind::Organizations => api
            .fetch_organizations(&request.scope)
            .await
            .map(EntityPayload::Organizations),
        EntityKind::UserModels => api
            .fetch_user_models(&request.scope)
            .await
            .map(EntityPayload::UserModels),
    };
    DriverEvent::Fetch(FetchOutcome {
        entity: request.entity,
        generation: request.generation,
        result,
    })
}
