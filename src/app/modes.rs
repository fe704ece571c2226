//! Screen and input mode state types for the application.
//!
//! The plugin shows exactly one [`Screen`] at a time. The [`InputMode`]
//! decides how keys are interpreted: in `Normal` mode letters are commands,
//! in `Typing` mode they go into the focused text input (login fields, the
//! film search term or the customer filter).

/// A page of the plugin.
///
/// Details screens carry the id of the record they show so navigating back
/// to one can tell whether its data is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    Films,
    Customers,
    FilmDetails(i64),
    ActorDetails(i64),
    CustomerDetails(i64),
}

impl Screen {
    /// Title shown in the header bar.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Dashboard => "Dashboard",
            Self::Films => "Browse Films",
            Self::Customers => "Customers",
            Self::FilmDetails(_) => "Film Details",
            Self::ActorDetails(_) => "Actor Details",
            Self::CustomerDetails(_) => "Customer Details",
        }
    }

    /// Whether the screen is one of the top-level tabs reachable with 1/2/3.
    #[must_use]
    pub const fn is_top_level(self) -> bool {
        matches!(self, Self::Dashboard | Self::Films | Self::Customers)
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are navigation and commands.
    Normal,

    /// Keys edit the focused text input.
    Typing,
}

/// Focused field of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginField {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Username,
        }
    }
}

/// Which ranking has focus on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardPane {
    #[default]
    Films,
    Actors,
}

impl DashboardPane {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Films => Self::Actors,
            Self::Actors => Self::Films,
        }
    }
}
