//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready strings only; every decision
//! about what to show (loading, error, empty, which page) is already made.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Text input shown above the content (film search, customer filter).
    pub search_bar: Option<SearchBarInfo>,

    /// One-line inline message, e.g. a validation error.
    pub notice: Option<Notice>,

    pub content: Content,

    /// Present for paginated tables.
    pub pagination: Option<PaginationInfo>,

    pub footer: FooterInfo,
}

/// Main area of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Centered message for loading, error and empty states.
    Message(EmptyState),

    Table(TableInfo),

    /// Stacked titled sections, used by the dashboard and details screens.
    Sections(Vec<SectionInfo>),

    Login(LoginFormInfo),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Centered status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,

    /// Errors render in the error color.
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Prompt before the query, e.g. `"Search By Title"`.
    pub label: String,
    pub query: String,
    pub is_focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

/// A table of records; only the rows that fit the pane are included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<RowInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub title: String,

    /// Fixed width in cells; `None` takes the remaining width.
    pub width: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowInfo {
    pub cells: Vec<String>,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// `"Page X of Y"`.
    pub page_label: String,

    /// Result count and page size, e.g. `"14 results, 12 per page"`.
    pub summary: String,

    pub has_previous: bool,
    pub has_next: bool,
}

/// A titled block of label/value fields and an optional selectable list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionInfo {
    pub title: String,
    pub fields: Vec<(String, String)>,
    pub items: Vec<DisplayItem>,

    /// Shown instead of `items` when the list is empty.
    pub placeholder: Option<String>,
}

/// One selectable line of a section list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub label: String,
    pub detail: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFormInfo {
    pub username: String,

    /// The password masked with `*`.
    pub password_mask: String,

    pub username_focused: bool,
    pub is_submitting: bool,
}
