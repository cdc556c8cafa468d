#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Closed set of display and authorization roles derived from the `user_role` claim.
pub enum ConsoleRole {
    AppOwner,
    Admin,
    AdminViewer,
    OrgAdmin,
    InternalUser,
    InternalViewer,
    AppUser,
    Unknown,
    #[default]
    Undefined,
}

impl ConsoleRole {
    /// Maps a raw role identifier onto the closed role set. Never fails.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Undefined;
        };
        if raw.is_empty() {
            return Self::Undefined;
        }
        match raw.to_ascii_lowercase().as_str() {
            "app_owner" | "demo_app_owner" => Self::AppOwner,
            "app_admin" | "proxy_admin" => Self::Admin,
            "proxy_admin_viewer" => Self::AdminViewer,
            "org_admin" => Self::OrgAdmin,
            "internal_user" => Self::InternalUser,
            // `internal_viewer` is the legacy spelling still issued by older proxies.
            "internal_user_viewer" | "internal_viewer" => Self::InternalViewer,
            "app_user" => Self::AppUser,
            _ => Self::Unknown,
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            Self::AppOwner => "App Owner",
            Self::Admin => "Admin",
            Self::AdminViewer => "Admin Viewer",
            Self::OrgAdmin => "Org Admin",
            Self::InternalUser => "Internal User",
            Self::InternalViewer => "Internal Viewer",
            Self::AppUser => "App User",
            Self::Unknown => "Unknown Role",
            Self::Undefined => "Undefined Role",
        }
    }

    /// Stable token used in rendered markup attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AppOwner => "app-owner",
            Self::Admin => "admin",
            Self::AdminViewer => "admin-viewer",
            Self::OrgAdmin => "org-admin",
            Self::InternalUser => "internal-user",
            Self::InternalViewer => "internal-viewer",
            Self::AppUser => "app-user",
            Self::Unknown => "unknown",
            Self::Undefined => "undefined",
        }
    }

    /// True once a role claim has been observed.
    pub fn is_established(self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// Roles that list proxy-wide entities without a `user_id` scope.
    pub fn is_admin_scope(self) -> bool {
        matches!(self, Self::Admin | Self::AdminViewer)
    }
}
