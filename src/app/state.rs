//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin. It owns the
//! session context, one view per screen, navigation history and the input
//! state, and knows which API requests each screen needs. The event handler
//! mutates it; the renderer reads it through
//! [`compute_viewmodel`](AppState::compute_viewmodel).

use super::actions::Action;
use super::details::DetailView;
use super::modes::{DashboardPane, InputMode, LoginField, Screen};
use crate::api::{ApiClient, ApiRequest, RequestContext, Target};
use crate::collection::{CollectionController, LoadTicket, Resource, SearchFilter, ViewState};
use crate::domain::{
    display_date, Actor, Credentials, Customer, CustomerDetails, Film, FilmSearchKind, LoginResponse, Record, Result,
    TopActor, TopFilm, REDACTED,
};
use crate::session::SessionContext;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnInfo, Content, DisplayItem, EmptyState, FooterInfo, HeaderInfo, LoginFormInfo, Notice, PaginationInfo,
    RowInfo, SearchBarInfo, SectionInfo, TableInfo, UIViewModel,
};
use std::fmt;

/// Page sizes offered by the customers and film result tables.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [6, 12, 24, 48];

pub const CUSTOMERS_ERROR: &str = "Failed to load customers";
pub const SEARCH_ERROR: &str = "Search failed";
pub const FILM_DETAILS_ERROR: &str = "Failed to load film details";
pub const ACTOR_DETAILS_ERROR: &str = "Failed to load actor details";
pub const CUSTOMER_DETAILS_ERROR: &str = "Failed to load customer details";
pub const LOGIN_ERROR: &str = "Login failed";
pub const MISSING_CREDENTIALS: &str = "Please enter username and password";
pub const MISSING_SEARCH_TERM: &str = "Please enter a search term";
pub const SESSION_EXPIRED: &str = "Session expired, please sign in again";

/// Number of an actor's films listed on the actor screen.
const ACTOR_FILM_LIMIT: usize = 5;

/// Rows used by the blank margins, header, borders, table heading and footer.
const CHROME_ROWS: usize = 7;
const SEARCH_BAR_ROWS: usize = 3;

/// Login form fields and the in-flight login call.
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,

    /// Validation or session-expiry message.
    pub notice: Option<String>,

    pub attempt: Resource<LoginResponse>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: LoginField::default(),
            notice: None,
            attempt: Resource::new(LOGIN_ERROR),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("focus", &self.focus)
            .field("notice", &self.notice)
            .field("attempt", &self.attempt)
            .finish()
    }
}

impl LoginForm {
    /// Empties the form, keeping the attempt's ticket sequence.
    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
        self.focus = LoginField::default();
        self.notice = None;
        self.attempt.reset();
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Server-side film search with client-side paging of the results.
#[derive(Debug)]
pub struct FilmSearch {
    pub kind: FilmSearchKind,
    pub term: String,
    pub notice: Option<String>,
    submitted: Option<(FilmSearchKind, String)>,
    pub results: CollectionController<Film>,
}

impl FilmSearch {
    fn new(page_size: usize) -> Self {
        Self {
            kind: FilmSearchKind::default(),
            term: String::new(),
            notice: None,
            submitted: None,
            results: CollectionController::new(SearchFilter::new(), page_size, SEARCH_ERROR),
        }
    }
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub theme: Theme,
    pub client: ApiClient,
    pub session: SessionContext,

    pub screen: Screen,
    history: Vec<Screen>,
    pub input_mode: InputMode,

    /// Zero-based cursor within the current screen's selectable list.
    pub selected_index: usize,
    pub dashboard_pane: DashboardPane,

    /// Host-level problem shown on every screen (e.g. missing permission).
    pub banner: Option<String>,

    pub login: LoginForm,
    pub top_films: Resource<Vec<TopFilm>>,
    pub top_actors: Resource<Vec<TopActor>>,
    pub customers: CollectionController<Customer>,
    pub film_search: FilmSearch,
    pub film_details: DetailView<Film>,
    pub actor_details: DetailView<Actor>,
    pub actor_films: Resource<Vec<Film>>,
    pub customer_details: DetailView<CustomerDetails>,
}

/// Fields the customer filter matches: id, first name, last name, email.
fn customer_filter() -> SearchFilter<Customer> {
    SearchFilter::new()
        .number(|c: &Customer| c.customer_id)
        .text(|c: &Customer| c.first_name.as_str())
        .text(|c: &Customer| c.last_name.as_str())
        .text(|c: &Customer| c.email.as_str())
}

impl AppState {
    /// Creates a signed-out state on the login screen.
    #[must_use]
    pub fn new(client: ApiClient, theme: Theme, page_size: usize) -> Self {
        Self {
            theme,
            client,
            session: SessionContext::default(),
            screen: Screen::Login,
            history: Vec::new(),
            input_mode: InputMode::Typing,
            selected_index: 0,
            dashboard_pane: DashboardPane::default(),
            banner: None,
            login: LoginForm::default(),
            top_films: Resource::new("Failed to load top films"),
            top_actors: Resource::new("Failed to load top actors"),
            customers: CollectionController::new(customer_filter(), page_size, CUSTOMERS_ERROR),
            film_search: FilmSearch::new(page_size),
            film_details: DetailView::new(FILM_DETAILS_ERROR),
            actor_details: DetailView::new(ACTOR_DETAILS_ERROR),
            actor_films: Resource::new("Failed to load actor films"),
            customer_details: DetailView::new(CUSTOMER_DETAILS_ERROR),
        }
    }

    /// Builds the action issuing `request` on behalf of `ticket`.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built, e.g. an authenticated call
    /// without a session.
    pub fn request(&self, request: &ApiRequest, ticket: LoadTicket) -> Result<Action> {
        self.request_for(request, request.target(), ticket)
    }

    /// Like [`request`](Self::request) but routes the response to `target`.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built.
    pub fn request_for(&self, request: &ApiRequest, target: Target, ticket: LoadTicket) -> Result<Action> {
        let call = self.client.build(request, &self.session)?;
        let context = RequestContext::new(target, ticket);
        Ok(Action::Request { call, context })
    }

    /// Navigates to `screen`, remembering the current one for `back`.
    ///
    /// # Errors
    ///
    /// Propagates request building failures.
    pub fn navigate(&mut self, screen: Screen) -> Result<Vec<Action>> {
        if screen == self.screen {
            return Ok(vec![]);
        }

        if screen.is_top_level() {
            self.history.clear();
            if screen != Screen::Dashboard {
                self.history.push(Screen::Dashboard);
            }
        } else if self.screen != Screen::Login {
            self.history.push(self.screen);
        }

        tracing::debug!(from = ?self.screen, to = ?screen, "navigating");
        self.show(screen)
    }

    /// Returns to the previous screen. `Ok(None)` when there is none.
    ///
    /// # Errors
    ///
    /// Propagates request building failures.
    pub fn back(&mut self) -> Result<Option<Vec<Action>>> {
        let Some(previous) = self.history.pop() else {
            return Ok(None);
        };
        tracing::debug!(from = ?self.screen, to = ?previous, "navigating back");
        self.show(previous).map(Some)
    }

    /// Makes `screen` current and issues whatever loads it still needs.
    fn show(&mut self, screen: Screen) -> Result<Vec<Action>> {
        self.screen = screen;
        self.selected_index = 0;
        self.input_mode = match screen {
            Screen::Login => InputMode::Typing,
            Screen::Films if self.film_search.submitted.is_none() => InputMode::Typing,
            _ => InputMode::Normal,
        };

        let mut actions = vec![];
        match screen {
            Screen::Login | Screen::Films => {}
            Screen::Dashboard => {
                if let Some(ticket) = self.top_films.ensure_loaded() {
                    actions.push(self.request(&ApiRequest::TopFilms, ticket)?);
                }
                if let Some(ticket) = self.top_actors.ensure_loaded() {
                    actions.push(self.request(&ApiRequest::TopActors, ticket)?);
                }
            }
            Screen::Customers => {
                if let Some(ticket) = self.customers.ensure_loaded() {
                    actions.push(self.request(&ApiRequest::Customers, ticket)?);
                }
            }
            Screen::FilmDetails(id) => {
                if let Some(ticket) = self.film_details.show(id) {
                    actions.push(self.request(&ApiRequest::FilmDetails(id), ticket)?);
                }
            }
            Screen::ActorDetails(id) => {
                if let Some(ticket) = self.actor_details.show(id) {
                    self.actor_films.reset();
                    actions.push(self.request(&ApiRequest::ActorDetails(id), ticket)?);
                }
            }
            Screen::CustomerDetails(id) => {
                if let Some(ticket) = self.customer_details.show(id) {
                    actions.push(self.request(&ApiRequest::CustomerDetails(id), ticket)?);
                }
            }
        }
        Ok(actions)
    }

    /// Re-fetches the data behind the current screen.
    ///
    /// # Errors
    ///
    /// Propagates request building failures.
    pub fn refresh(&mut self) -> Result<Vec<Action>> {
        let mut actions = vec![];
        match self.screen {
            Screen::Login => {}
            Screen::Dashboard => {
                let ticket = self.top_films.begin_load();
                actions.push(self.request(&ApiRequest::TopFilms, ticket)?);
                let ticket = self.top_actors.begin_load();
                actions.push(self.request(&ApiRequest::TopActors, ticket)?);
            }
            Screen::Customers => {
                let ticket = self.customers.begin_load();
                actions.push(self.request(&ApiRequest::Customers, ticket)?);
            }
            Screen::Films => {
                if let Some((kind, term)) = self.film_search.submitted.clone() {
                    let ticket = self.film_search.results.begin_load();
                    actions.push(self.request(&ApiRequest::SearchFilms { kind, term }, ticket)?);
                }
            }
            Screen::FilmDetails(id) => {
                if let Some(ticket) = self.film_details.refresh() {
                    actions.push(self.request(&ApiRequest::FilmDetails(id), ticket)?);
                }
            }
            Screen::ActorDetails(id) => {
                if let Some(ticket) = self.actor_details.refresh() {
                    self.actor_films.reset();
                    actions.push(self.request(&ApiRequest::ActorDetails(id), ticket)?);
                }
            }
            Screen::CustomerDetails(id) => {
                if let Some(ticket) = self.customer_details.refresh() {
                    actions.push(self.request(&ApiRequest::CustomerDetails(id), ticket)?);
                }
            }
        }
        self.selected_index = 0;
        Ok(actions)
    }

    /// Validates the login form and issues the login call.
    ///
    /// # Errors
    ///
    /// Propagates request building failures.
    pub fn submit_login(&mut self) -> Result<Vec<Action>> {
        if self.login.username.trim().is_empty() || self.login.password.is_empty() {
            self.login.notice = Some(MISSING_CREDENTIALS.to_string());
            return Ok(vec![]);
        }

        self.login.notice = None;
        let credentials = Credentials {
            username: self.login.username.trim().to_string(),
            password: self.login.password.clone(),
        };
        let ticket = self.login.attempt.begin_load();
        Ok(vec![self.request(&ApiRequest::Login(credentials), ticket)?])
    }

    /// Starts the session from a successful login and opens the dashboard.
    ///
    /// # Errors
    ///
    /// Fails when the response carries no usable token.
    pub fn complete_login(&mut self, response: LoginResponse) -> Result<Vec<Action>> {
        self.session.establish(response)?;
        self.login.clear();
        self.history.clear();
        self.show(Screen::Dashboard)
    }

    /// Validates the search term and issues the film search.
    ///
    /// # Errors
    ///
    /// Propagates request building failures.
    pub fn submit_film_search(&mut self) -> Result<Vec<Action>> {
        if self.film_search.term.trim().is_empty() {
            self.film_search.notice = Some(MISSING_SEARCH_TERM.to_string());
            return Ok(vec![]);
        }

        self.film_search.notice = None;
        let kind = self.film_search.kind;
        let term = self.film_search.term.clone();
        self.film_search.submitted = Some((kind, term.clone()));
        self.selected_index = 0;

        let ticket = self.film_search.results.begin_load();
        Ok(vec![self.request(&ApiRequest::SearchFilms { kind, term }, ticket)?])
    }

    /// Issues the follow-up search for the films of a loaded actor.
    ///
    /// # Errors
    ///
    /// Propagates request building failures.
    pub fn load_actor_films(&mut self) -> Result<Vec<Action>> {
        let Some(actor) = self.actor_details.value() else {
            return Ok(vec![]);
        };
        let term = format!("{} {}", actor.first_name, actor.last_name);
        let ticket = self.actor_films.begin_load();
        let request = ApiRequest::SearchFilms {
            kind: FilmSearchKind::Actor,
            term,
        };
        Ok(vec![self.request_for(&request, Target::ActorFilms, ticket)?])
    }

    /// Ends the session and returns to a pristine login screen.
    pub fn logout(&mut self) {
        self.session.teardown();
        self.reset_views();
        self.login.clear();
        self.history.clear();
        self.screen = Screen::Login;
        self.input_mode = InputMode::Typing;
        self.selected_index = 0;
    }

    /// Logs out because the API rejected the token.
    pub fn expire_session(&mut self) {
        tracing::info!("api rejected the session token");
        self.logout();
        self.login.notice = Some(SESSION_EXPIRED.to_string());
    }

    /// Drops every loaded record and abandons in-flight fetches.
    fn reset_views(&mut self) {
        self.top_films.reset();
        self.top_actors.reset();
        self.customers.reset();
        self.customers.set_query(String::new());
        self.film_search.results.reset();
        self.film_search.kind = FilmSearchKind::default();
        self.film_search.term.clear();
        self.film_search.notice = None;
        self.film_search.submitted = None;
        self.film_details.reset();
        self.actor_details.reset();
        self.actor_films.reset();
        self.customer_details.reset();
        self.dashboard_pane = DashboardPane::default();
    }

    /// Steps the current table's page size through [`PAGE_SIZE_CHOICES`].
    pub fn cycle_page_size(&mut self) -> bool {
        let controller_page_size = match self.screen {
            Screen::Customers => self.customers.page_size(),
            Screen::Films => self.film_search.results.page_size(),
            _ => return false,
        };
        let next = PAGE_SIZE_CHOICES
            .iter()
            .copied()
            .find(|&size| size > controller_page_size)
            .unwrap_or(PAGE_SIZE_CHOICES[0]);

        match self.screen {
            Screen::Customers => self.customers.set_page_size(next),
            _ => self.film_search.results.set_page_size(next),
        }
        self.selected_index = 0;
        true
    }

    /// Moves to the next (`forward`) or previous page of the current table.
    pub fn turn_page(&mut self, forward: bool) -> bool {
        let moved = match self.screen {
            Screen::Customers => step_page(&mut self.customers, forward),
            Screen::Films => step_page(&mut self.film_search.results, forward),
            _ => return false,
        };
        if moved {
            self.selected_index = 0;
        }
        moved
    }

    /// Number of selectable entries on the current screen.
    #[must_use]
    pub fn selectable_count(&self) -> usize {
        match self.screen {
            Screen::Login => 0,
            Screen::Dashboard => match self.dashboard_pane {
                DashboardPane::Films => loaded_len(self.top_films.state()),
                DashboardPane::Actors => loaded_len(self.top_actors.state()),
            },
            Screen::Customers => loaded_page_len(&self.customers),
            Screen::Films => loaded_page_len(&self.film_search.results),
            Screen::FilmDetails(_) => match self.film_details.state() {
                ViewState::Loaded(film) => film.cast().len(),
                _ => 0,
            },
            Screen::ActorDetails(_) => match (self.actor_details.state(), self.actor_films.state()) {
                (ViewState::Loaded(_), ViewState::Loaded(films)) => films.len().min(ACTOR_FILM_LIMIT),
                _ => 0,
            },
            Screen::CustomerDetails(_) => 0,
        }
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let count = self.selectable_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let count = self.selectable_count();
        if count == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            count - 1
        } else {
            (self.selected_index - 1).min(count - 1)
        };
    }

    /// The screen the selected entry leads to, if any.
    #[must_use]
    pub fn selected_destination(&self) -> Option<Screen> {
        let index = self.selected_index;
        match self.screen {
            Screen::Dashboard => match self.dashboard_pane {
                DashboardPane::Films => match self.top_films.state() {
                    ViewState::Loaded(films) => films.get(index).map(|f| Screen::FilmDetails(f.id())),
                    _ => None,
                },
                DashboardPane::Actors => match self.top_actors.state() {
                    ViewState::Loaded(actors) => actors.get(index).map(|a| Screen::ActorDetails(a.id())),
                    _ => None,
                },
            },
            Screen::Customers if matches!(self.customers.state(), ViewState::Loaded(_)) => self
                .customers
                .visible_slice()
                .items
                .get(index)
                .map(|c| Screen::CustomerDetails(c.id())),
            Screen::Films if matches!(self.film_search.results.state(), ViewState::Loaded(_)) => self
                .film_search
                .results
                .visible_slice()
                .items
                .get(index)
                .map(|f| Screen::FilmDetails(f.id())),
            Screen::FilmDetails(_) => self
                .film_details
                .value()
                .and_then(|film| film.cast().get(index))
                .map(|actor| Screen::ActorDetails(actor.id())),
            Screen::ActorDetails(_) => match self.actor_films.state() {
                ViewState::Loaded(films) if index < ACTOR_FILM_LIMIT => {
                    films.get(index).map(|f| Screen::FilmDetails(f.id()))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", screen = ?self.screen, rows, cols).entered();

        let search_bar = self.compute_search_bar();
        let notice = self.compute_notice();
        let mut available = rows.saturating_sub(CHROME_ROWS);
        if search_bar.is_some() {
            available = available.saturating_sub(SEARCH_BAR_ROWS);
        }
        if notice.is_some() {
            available = available.saturating_sub(1);
        }

        let (content, pagination) = match self.screen {
            Screen::Login => (Content::Login(self.compute_login_form()), None),
            Screen::Dashboard => (Content::Sections(self.compute_dashboard()), None),
            Screen::Customers => self.compute_customers(available.saturating_sub(1), cols),
            Screen::Films => self.compute_films(available.saturating_sub(1), cols),
            Screen::FilmDetails(_) => (self.compute_film_details(), None),
            Screen::ActorDetails(_) => (self.compute_actor_details(), None),
            Screen::CustomerDetails(_) => (self.compute_customer_details(), None),
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar,
            notice,
            content,
            pagination,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.session.staff() {
            Some(staff) => format!(" {}  |  {} ", self.screen.title(), staff.display_name()),
            None => format!(" {} ", self.screen.title()),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.screen, self.input_mode) {
            (Screen::Login, _) => "Tab: switch field  Enter: sign in",
            (Screen::Films, InputMode::Typing) => "Type a term  Tab: search type  Enter: search  Esc: done",
            (Screen::Customers, InputMode::Typing) => "Type to filter  Enter/Esc: done",
            (Screen::Dashboard, _) => {
                "j/k: navigate  Tab: switch list  Enter: open  2: films  3: customers  r: refresh  L: logout  q: hide"
            }
            (Screen::Films, InputMode::Normal) => {
                "/: search  Tab: search type  j/k: navigate  n/p: page  s: page size  Enter: open  Esc: back  q: hide"
            }
            (Screen::Customers, InputMode::Normal) => {
                "/: filter  j/k: navigate  n/p: page  s: page size  Enter: open  r: refresh  Esc: back  q: hide"
            }
            (Screen::CustomerDetails(_), _) => "Esc: back  r: refresh  1/2/3: dashboard/films/customers  q: hide",
            (Screen::FilmDetails(_) | Screen::ActorDetails(_), _) => {
                "j/k: navigate  Enter: open  Esc: back  r: refresh  1/2/3: dashboard/films/customers  q: hide"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let is_focused = self.input_mode == InputMode::Typing;
        match self.screen {
            Screen::Films => Some(SearchBarInfo {
                label: format!("Search {}", self.film_search.kind.label()),
                query: self.film_search.term.clone(),
                is_focused,
            }),
            Screen::Customers => Some(SearchBarInfo {
                label: "Filter".to_string(),
                query: self.customers.query().to_string(),
                is_focused,
            }),
            _ => None,
        }
    }

    fn compute_notice(&self) -> Option<Notice> {
        if let Some(banner) = &self.banner {
            return Some(Notice {
                text: banner.clone(),
                is_error: true,
            });
        }

        let text = match self.screen {
            Screen::Login => match self.login.attempt.state() {
                ViewState::Error(message) => Some(message.to_string()),
                _ => self.login.notice.clone(),
            },
            Screen::Films => self.film_search.notice.clone(),
            _ => None,
        }?;
        Some(Notice { text, is_error: true })
    }

    fn compute_login_form(&self) -> LoginFormInfo {
        LoginFormInfo {
            username: self.login.username.clone(),
            password_mask: "*".repeat(self.login.password.chars().count()),
            username_focused: self.login.focus == LoginField::Username,
            is_submitting: self.login.attempt.state().is_loading(),
        }
    }

    fn compute_dashboard(&self) -> Vec<SectionInfo> {
        let mut sections = vec![];

        if let Some(staff) = self.session.staff() {
            sections.push(SectionInfo {
                title: format!("Welcome, {}!", staff.display_name()),
                fields: vec![
                    ("Username".to_string(), staff.username.clone()),
                    ("Staff ID".to_string(), staff.staff_id.to_string()),
                    (
                        "Status".to_string(),
                        if staff.active != 0 { "Active" } else { "Inactive" }.to_string(),
                    ),
                ],
                ..SectionInfo::default()
            });
        }

        let films_focused = self.dashboard_pane == DashboardPane::Films;
        let film_items = match self.top_films.state() {
            ViewState::Loaded(films) => films
                .iter()
                .enumerate()
                .map(|(i, film)| DisplayItem {
                    label: format!("#{} {}", i + 1, film.title),
                    detail: format!("{} rentals", film.rentals),
                    is_selected: films_focused && i == self.selected_index,
                })
                .collect(),
            _ => vec![],
        };
        sections.push(SectionInfo {
            title: "Top 5 Rented Films".to_string(),
            placeholder: Some(list_placeholder(self.top_films.state().is_loading())),
            items: film_items,
            ..SectionInfo::default()
        });

        let actor_items = match self.top_actors.state() {
            ViewState::Loaded(actors) => actors
                .iter()
                .enumerate()
                .map(|(i, actor)| DisplayItem {
                    label: format!("#{} {}", i + 1, actor.display_name()),
                    detail: format!("{} films in store", actor.films_in_store),
                    is_selected: !films_focused && i == self.selected_index,
                })
                .collect(),
            _ => vec![],
        };
        sections.push(SectionInfo {
            title: "Top 5 Actors".to_string(),
            placeholder: Some(list_placeholder(self.top_actors.state().is_loading())),
            items: actor_items,
            ..SectionInfo::default()
        });

        sections
    }

    fn compute_customers(&self, available_rows: usize, cols: usize) -> (Content, Option<PaginationInfo>) {
        let empty_subtitle = if self.customers.query().trim().is_empty() {
            ""
        } else {
            "Try adjusting your search terms"
        };
        match self.customers.state() {
            ViewState::Idle | ViewState::Loading => (message("Loading customers...", "", false), None),
            ViewState::Error(reason) => (message(reason, "Press r to retry", true), None),
            ViewState::Loaded(_) => {
                let slice = self.customers.visible_slice();
                if slice.total_count == 0 {
                    return (message("No customers found", empty_subtitle, false), None);
                }

                let email_width = cols.saturating_sub(6 + 24 + 9 + 12 + 4).clamp(10, 40);
                let columns = vec![
                    column("ID", Some(6)),
                    column("NAME", Some(24)),
                    column("EMAIL", Some(email_width)),
                    column("STATUS", Some(9)),
                    column("MEMBER SINCE", None),
                ];
                let rows = slice
                    .items
                    .iter()
                    .map(|customer| {
                        vec![
                            customer.customer_id.to_string(),
                            customer.display_name(),
                            customer.email.clone(),
                            customer.status_label().to_string(),
                            customer.member_since(),
                        ]
                    })
                    .collect();

                let table = self.windowed_table(columns, rows, available_rows);
                (Content::Table(table), Some(pagination(&slice, "customers")))
            }
        }
    }

    fn compute_films(&self, available_rows: usize, cols: usize) -> (Content, Option<PaginationInfo>) {
        match self.film_search.results.state() {
            ViewState::Idle => (
                message(
                    "Search the film catalog",
                    "Type a term and press Enter; Tab changes the search type",
                    false,
                ),
                None,
            ),
            ViewState::Loading => (message("Searching...", "", false), None),
            ViewState::Error(reason) => (message(reason, "Press r to retry", true), None),
            ViewState::Loaded(_) => {
                let slice = self.film_search.results.visible_slice();
                if slice.total_count == 0 {
                    return (
                        message("No films found", "Try a different search term or search type", false),
                        None,
                    );
                }

                let title_width = cols.saturating_sub(6 + 7 + 9 + 4).clamp(12, 30);
                let columns = vec![
                    column("TITLE", Some(title_width)),
                    column("YEAR", Some(6)),
                    column("RATING", Some(7)),
                    column("LENGTH", Some(9)),
                    column("DESCRIPTION", None),
                ];
                let rows = slice
                    .items
                    .iter()
                    .map(|film| {
                        vec![
                            film.title.clone(),
                            film.release_year.to_string(),
                            film.rating.clone(),
                            format!("{} min", film.length),
                            film.summary(),
                        ]
                    })
                    .collect();

                let table = self.windowed_table(columns, rows, available_rows);
                (Content::Table(table), Some(pagination(&slice, "films")))
            }
        }
    }

    /// Keeps the selected row visible when the page is taller than the pane.
    fn windowed_table(&self, columns: Vec<ColumnInfo>, rows: Vec<Vec<String>>, available_rows: usize) -> TableInfo {
        let total = rows.len();
        let available = available_rows.max(1);

        let mut start = self.selected_index.saturating_sub(available / 2);
        let end = (start + available).min(total);
        if end - start < available && total >= available {
            start = end.saturating_sub(available);
        }

        let rows = rows
            .into_iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(index, cells)| RowInfo {
                cells,
                is_selected: index == self.selected_index,
            })
            .collect();

        TableInfo { columns, rows }
    }

    fn compute_film_details(&self) -> Content {
        let film = match self.film_details.state() {
            ViewState::Idle | ViewState::Loading => return message("Loading film details...", "", false),
            ViewState::Error(reason) => return message(reason, "Press Esc to go back", true),
            ViewState::Loaded(film) => film,
        };

        let mut info = vec![
            field("Release Year", film.release_year.to_string()),
            field("Rating", film.rating.clone()),
            field("Length", format!("{} minutes", film.length)),
            field("Rental Duration", format!("{} days", film.rental_duration)),
            field("Rental Rate", format!("${:.2}", film.rental_rate)),
            field("Replacement Cost", format!("${:.2}", film.replacement_cost)),
        ];
        if let Some(category) = &film.category {
            info.push(field("Category", category.name.clone()));
        }
        if !film.special_features.is_empty() {
            info.push(field("Special Features", film.special_features.join(", ")));
        }
        info.push(field("Description", film.description.clone()));

        let cast = film.cast();
        let items = cast
            .iter()
            .enumerate()
            .map(|(i, actor)| DisplayItem {
                label: actor.full_name.clone(),
                detail: format!("actor #{}", actor.actor_id),
                is_selected: i == self.selected_index,
            })
            .collect();

        Content::Sections(vec![
            SectionInfo {
                title: film.title.clone(),
                fields: info,
                ..SectionInfo::default()
            },
            SectionInfo {
                title: format!("Cast ({})", cast.len()),
                items,
                placeholder: Some("No cast information available".to_string()),
                ..SectionInfo::default()
            },
        ])
    }

    fn compute_actor_details(&self) -> Content {
        let actor = match self.actor_details.state() {
            ViewState::Idle | ViewState::Loading => return message("Loading actor details...", "", false),
            ViewState::Error(reason) => return message(reason, "Press Esc to go back", true),
            ViewState::Loaded(actor) => actor,
        };

        let (items, placeholder) = match self.actor_films.state() {
            ViewState::Loaded(films) => (
                films
                    .iter()
                    .take(ACTOR_FILM_LIMIT)
                    .enumerate()
                    .map(|(i, film)| DisplayItem {
                        label: format!("#{} {}", i + 1, film.title),
                        detail: format!("{} | {} | {} min", film.release_year, film.rating, film.length),
                        is_selected: i == self.selected_index,
                    })
                    .collect(),
                "No films available",
            ),
            ViewState::Idle | ViewState::Loading => (vec![], "Loading films..."),
            ViewState::Error(_) => (vec![], "No films available"),
        };

        Content::Sections(vec![
            SectionInfo {
                title: actor.full_name.clone(),
                fields: vec![
                    field("First Name", actor.first_name.clone()),
                    field("Last Name", actor.last_name.clone()),
                    field("Actor ID", actor.actor_id.to_string()),
                ],
                ..SectionInfo::default()
            },
            SectionInfo {
                title: "Top 5 Rented Films".to_string(),
                items,
                placeholder: Some(placeholder.to_string()),
                ..SectionInfo::default()
            },
        ])
    }

    fn compute_customer_details(&self) -> Content {
        let details = match self.customer_details.state() {
            ViewState::Idle | ViewState::Loading => return message("Loading customer details...", "", false),
            ViewState::Error(reason) => return message(reason, "Press Esc to go back", true),
            ViewState::Loaded(details) => details,
        };
        let customer = &details.customer;

        let mut address_fields = vec![];
        if let Some(address) = &details.address {
            address_fields.push(field("Address", address.address.clone()));
            if let Some(line) = address.address2.as_deref().filter(|line| !line.trim().is_empty()) {
                address_fields.push(field("Address 2", line.to_string()));
            }
            if let Some(locality) = details.locality() {
                address_fields.push(field("Locality", locality));
            }
            if let Some(postal_code) = address.postal_code.as_deref().filter(|code| !code.is_empty()) {
                address_fields.push(field("Postal Code", postal_code.to_string()));
            }
            if let Some(phone) = address.phone.as_deref().filter(|phone| !phone.is_empty()) {
                address_fields.push(field("Phone", phone.to_string()));
            }
        }

        Content::Sections(vec![
            SectionInfo {
                title: customer.display_name(),
                fields: vec![
                    field("Customer ID", customer.customer_id.to_string()),
                    field("Email", customer.email.clone()),
                    field("Status", customer.status_label().to_string()),
                    field("Member Since", customer.member_since()),
                    field("Last Update", display_date(&customer.last_update)),
                ],
                ..SectionInfo::default()
            },
            SectionInfo {
                title: "Address Information".to_string(),
                fields: address_fields,
                placeholder: details.address.is_none().then(|| "No address on file".to_string()),
                ..SectionInfo::default()
            },
        ])
    }
}

fn loaded_len<T>(state: ViewState<'_, Vec<T>>) -> usize {
    match state {
        ViewState::Loaded(items) => items.len(),
        _ => 0,
    }
}

fn loaded_page_len<T>(controller: &CollectionController<T>) -> usize {
    match controller.state() {
        ViewState::Loaded(_) => controller.visible_slice().items.len(),
        _ => 0,
    }
}

fn list_placeholder(loading: bool) -> String {
    if loading { "Loading..." } else { "No data available" }.to_string()
}

fn message(text: &str, subtitle: &str, is_error: bool) -> Content {
    Content::Message(EmptyState {
        message: text.to_string(),
        subtitle: subtitle.to_string(),
        is_error,
    })
}

fn column(title: &str, width: Option<usize>) -> ColumnInfo {
    ColumnInfo {
        title: title.to_string(),
        width,
    }
}

fn field(label: &str, value: String) -> (String, String) {
    (label.to_string(), value)
}

fn pagination<T>(slice: &crate::collection::VisibleSlice<'_, T>, noun: &str) -> PaginationInfo {
    PaginationInfo {
        page_label: format!("Page {} of {}", slice.current_page, slice.total_pages),
        summary: format!("{} {noun}, {} per page", slice.total_count, slice.page_size),
        has_previous: slice.has_previous(),
        has_next: slice.has_next(),
    }
}

/// Steps `controller` one page; `false` if it was already at the edge.
fn step_page<T>(controller: &mut CollectionController<T>, forward: bool) -> bool {
    let before = controller.current_page();
    if forward {
        controller.next_page();
    } else {
        controller.prev_page();
    }
    controller.current_page() != before
}
