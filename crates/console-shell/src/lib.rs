//! Entry shell of the proxy admin console.
//!
//! [`ConsoleShell`] is the session-bootstrap and navigation state machine;
//! [`ShellDriver`] runs its effects against the proxy on a single task and
//! [`render_console_shell`] turns the current [`ShellView`] into markup.

mod config;
mod driver;
mod entities;
mod error;
mod panel;
mod panel_props;
mod render;
mod state;

pub use config::ShellConfig;
pub use driver::{ConsoleApiFactory, DriverReport, ProxyClientFactory, ShellDriver};
pub use entities::{
    EntityKind, EntityList, EntityMutation, MutationKind, MutationOrigin, MutationSink,
};
pub use error::ShellError;
pub use panel::{ConsolePage, PANEL_VOCABULARY, USAGE_PAGE};
pub use panel_props::{
    AdminPanelProps, CachingProps, GuardrailsProps, ModelDashboardProps, ModelHubProps,
    ModelSettingsProps, NavbarProps, NewUsageProps, OrganizationsProps, PanelInputs, PanelProps,
    PlaygroundProps, ScopedAccessProps, SettingsProps, SidebarLink, SidebarProps,
    SpendLogsProps, TeamsProps, UsageProps, UserDashboardProps, UsersProps,
};
pub use render::{
    render_console_shell, render_dashboard, render_invitation_view, render_loading_screen,
};
pub use state::{
    ConsoleShell, DashboardView, EntityPayload, FetchOutcome, FetchRequest, ShellEffect,
    ShellView,
};

#[cfg(test)]
mod tests;
