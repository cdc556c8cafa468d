use console_client::{Organization, ProxySettings, Team};
use serde_json::Value;

use crate::ConsolePage;

#[derive(Debug, Clone, PartialEq, Default)]
/// Fetch state of one entity list. Anything but `Loaded` renders as empty.
pub enum EntityList<T> {
    #[default]
    Pending,
    Loaded(Vec<T>),
    Unavailable,
}

impl<T> EntityList<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items.as_slice(),
            Self::Pending | Self::Unavailable => &[],
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn state_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Loaded(_) => "loaded",
            Self::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Entity lists the shell fetches once a full session scope is known.
pub enum EntityKind {
    Teams,
    Organizations,
    UserModels,
}

impl EntityKind {
    pub const ALL: [Self; 3] = [Self::Teams, Self::Organizations, Self::UserModels];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Teams => "teams",
            Self::Organizations => "organizations",
            Self::UserModels => "user-models",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// State change requested by a panel or the navbar.
pub enum EntityMutation {
    /// Appends one key row and toggles the `create_clicked` flag.
    AddKey(Value),
    SetKeys(Vec<Value>),
    SetTeams(Vec<Team>),
    SetOrganizations(Vec<Organization>),
    /// Raw role id; normalized before it is stored.
    SetUserRole(String),
    SetUserEmail(Option<String>),
    SetModelData(Value),
    SetProxySettings(ProxySettings),
}

impl EntityMutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::AddKey(_) => MutationKind::AddKey,
            Self::SetKeys(_) => MutationKind::SetKeys,
            Self::SetTeams(_) => MutationKind::SetTeams,
            Self::SetOrganizations(_) => MutationKind::SetOrganizations,
            Self::SetUserRole(_) => MutationKind::SetUserRole,
            Self::SetUserEmail(_) => MutationKind::SetUserEmail,
            Self::SetModelData(_) => MutationKind::SetModelData,
            Self::SetProxySettings(_) => MutationKind::SetProxySettings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    AddKey,
    SetKeys,
    SetTeams,
    SetOrganizations,
    SetUserRole,
    SetUserEmail,
    SetModelData,
    SetProxySettings,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddKey => "add-key",
            Self::SetKeys => "set-keys",
            Self::SetTeams => "set-teams",
            Self::SetOrganizations => "set-organizations",
            Self::SetUserRole => "set-user-role",
            Self::SetUserEmail => "set-user-email",
            Self::SetModelData => "set-model-data",
            Self::SetProxySettings => "set-proxy-settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Component that submitted a mutation.
pub enum MutationOrigin {
    Panel(ConsolePage),
    Navbar,
}

impl MutationOrigin {
    pub fn permits(self, kind: MutationKind) -> bool {
        match self {
            Self::Panel(page) => page.permitted_mutations().contains(&kind),
            Self::Navbar => kind == MutationKind::SetProxySettings,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Panel(page) => page.component_name(),
            Self::Navbar => "Navbar",
        }
    }
}

#[derive(Debug, Default)]
/// Queue of mutations submitted by mounted components; drained by the shell.
pub struct MutationSink {
    pending: Vec<(MutationOrigin, EntityMutation)>,
}

impl MutationSink {
    pub fn submit(&mut self, origin: MutationOrigin, mutation: EntityMutation) {
        self.pending.push((origin, mutation));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn drain(&mut self) -> Vec<(MutationOrigin, EntityMutation)> {
        std::mem::take(&mut self.pending)
    }
}
