//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point the plugin shim calls. It
//! mutates [`AppState`] and returns whether a re-render is needed together
//! with the side effects to carry out.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Enter`, `Escape`, `Tab`, `ShowDashboard`,
//!   `ShowFilms`, `ShowCustomers`
//! - **Input**: `Char`, `Backspace`, `FocusInput`
//! - **Tables**: `NextPage`, `PrevPage`, `CyclePageSize`
//! - **Commands**: `Refresh`, `Logout`, `CloseFocus`
//! - **System**: `PermissionsResult`, `ApiResponse`

use super::modes::{InputMode, Screen};
use crate::api::response;
use crate::api::{RequestContext, Target};
use crate::collection::ViewState;
use crate::app::state::LOGIN_ERROR;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use std::collections::BTreeMap;

/// Shown when the host refuses web access.
pub const PERMISSION_DENIED: &str = "Web access was denied; the rental API cannot be reached";

/// Events triggered by user input or the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Submits the focused form or opens the selected entry.
    Enter,
    /// Leaves text input, or goes back one screen.
    Escape,
    /// Switches login field, dashboard list or film search type.
    Tab,
    /// Starts typing into the screen's search or filter input.
    FocusInput,
    /// Appends a character to the focused input.
    Char(char),
    /// Removes the last character from the focused input.
    Backspace,

    ShowDashboard,
    ShowFilms,
    ShowCustomers,

    NextPage,
    PrevPage,
    CyclePageSize,

    /// Re-fetches the data of the current screen.
    Refresh,
    Logout,

    /// Hides the plugin pane.
    CloseFocus,

    /// Reports whether the user granted the requested permissions.
    PermissionsResult { granted: bool },

    /// A finished web request, with the context map it was issued with.
    ApiResponse {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },
}

/// Processes an event and returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns errors from building API requests. Fetch failures never surface
/// here; they are recorded in view state.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event), screen = ?state.screen).entered();

    match event {
        Event::KeyDown | Event::KeyUp if state.screen == Screen::Login => {
            state.login.focus = state.login.focus.toggled();
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Enter => handle_enter(state),
        Event::Escape => handle_escape(state),
        Event::Tab => {
            match state.screen {
                Screen::Login => state.login.focus = state.login.focus.toggled(),
                Screen::Dashboard => {
                    state.dashboard_pane = state.dashboard_pane.toggled();
                    state.selected_index = 0;
                }
                Screen::Films => state.film_search.kind = state.film_search.kind.next(),
                _ => return Ok((false, vec![])),
            }
            Ok((true, vec![]))
        }
        Event::FocusInput => {
            if !matches!(state.screen, Screen::Films | Screen::Customers) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::Char(c) => edit_input(state, |input| input.push(*c)),
        Event::Backspace => edit_input(state, |input| {
            input.pop();
        }),
        Event::ShowDashboard => show(state, Screen::Dashboard),
        Event::ShowFilms => show(state, Screen::Films),
        Event::ShowCustomers => show(state, Screen::Customers),
        Event::NextPage => Ok((state.turn_page(true), vec![])),
        Event::PrevPage => Ok((state.turn_page(false), vec![])),
        Event::CyclePageSize => Ok((state.cycle_page_size(), vec![])),
        Event::Refresh => {
            if !state.session.is_authenticated() {
                return Ok((false, vec![]));
            }
            let actions = state.refresh()?;
            Ok((true, actions))
        }
        Event::Logout => {
            if !state.session.is_authenticated() {
                return Ok((false, vec![]));
            }
            state.logout();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::PermissionsResult { granted } => {
            if *granted {
                state.banner = None;
            } else {
                tracing::warn!("web access permission denied");
                state.banner = Some(PERMISSION_DENIED.to_string());
            }
            Ok((true, vec![]))
        }
        Event::ApiResponse { status, body, context } => handle_response(state, *status, body, context),
    }
}

/// Short name for the span; response bodies are too large to log.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::Enter => "Enter",
        Event::Escape => "Escape",
        Event::Tab => "Tab",
        Event::FocusInput => "FocusInput",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::ShowDashboard => "ShowDashboard",
        Event::ShowFilms => "ShowFilms",
        Event::ShowCustomers => "ShowCustomers",
        Event::NextPage => "NextPage",
        Event::PrevPage => "PrevPage",
        Event::CyclePageSize => "CyclePageSize",
        Event::Refresh => "Refresh",
        Event::Logout => "Logout",
        Event::CloseFocus => "CloseFocus",
        Event::PermissionsResult { .. } => "PermissionsResult",
        Event::ApiResponse { .. } => "ApiResponse",
    }
}

fn show(state: &mut AppState, screen: Screen) -> Result<(bool, Vec<Action>)> {
    if !state.session.is_authenticated() {
        return Ok((false, vec![]));
    }
    let actions = state.navigate(screen)?;
    Ok((true, actions))
}

fn handle_enter(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match (state.screen, state.input_mode) {
        (Screen::Login, _) => {
            if state.login.attempt.state().is_loading() {
                return Ok((false, vec![]));
            }
            let actions = state.submit_login()?;
            Ok((true, actions))
        }
        (Screen::Films, InputMode::Typing) => {
            let actions = state.submit_film_search()?;
            if !actions.is_empty() {
                state.input_mode = InputMode::Normal;
            }
            Ok((true, actions))
        }
        (Screen::Customers, InputMode::Typing) => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        _ => {
            let Some(destination) = state.selected_destination() else {
                tracing::debug!(selected = state.selected_index, "nothing to open");
                return Ok((false, vec![]));
            };
            let actions = state.navigate(destination)?;
            Ok((true, actions))
        }
    }
}

fn handle_escape(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if state.screen == Screen::Login {
        return Ok((false, vec![]));
    }
    if state.input_mode == InputMode::Typing {
        state.input_mode = InputMode::Normal;
        return Ok((true, vec![]));
    }
    match state.back()? {
        Some(actions) => Ok((true, actions)),
        None => Ok((false, vec![])),
    }
}

/// Applies `edit` to whichever text input currently has focus.
fn edit_input(state: &mut AppState, edit: impl FnOnce(&mut String)) -> Result<(bool, Vec<Action>)> {
    match (state.screen, state.input_mode) {
        (Screen::Login, _) => {
            edit(state.login.focused_mut());
            state.login.notice = None;
        }
        (Screen::Films, InputMode::Typing) => {
            edit(&mut state.film_search.term);
            state.film_search.notice = None;
        }
        (Screen::Customers, InputMode::Typing) => {
            let mut query = state.customers.query().to_string();
            edit(&mut query);
            tracing::trace!(query = %query, "customer filter updated");
            state.customers.set_query(query);
            state.selected_index = 0;
        }
        _ => return Ok((false, vec![])),
    }
    Ok((true, vec![]))
}

/// Routes a finished web request to the view that issued it.
fn handle_response(
    state: &mut AppState,
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> Result<(bool, Vec<Action>)> {
    let context = match RequestContext::from_map(context) {
        Ok(context) => context,
        Err(e) => {
            tracing::warn!(error = %e, status, "dropping response without a usable context");
            return Ok((false, vec![]));
        }
    };

    let span = tracing::debug_span!(
        "api_response",
        target = %context.target,
        generation = context.generation,
        status
    );
    if let Some(trace) = &context.trace {
        trace.adopt(&span);
    }
    let _guard = span.entered();

    let ticket = context.ticket();
    let mut actions = vec![];
    let settled = match context.target {
        Target::Login => {
            if !state.login.attempt.settle(ticket, response::decode(status, body)) {
                return Ok(stale());
            }
            let Some(login) = state.login.attempt.value().cloned() else {
                return Ok((true, vec![]));
            };
            match state.complete_login(login) {
                Ok(dashboard) => actions = dashboard,
                Err(e) => {
                    tracing::warn!(error = %e, "login response rejected");
                    state.login.attempt.reset();
                    state.login.notice = Some(LOGIN_ERROR.to_string());
                }
            }
            true
        }
        Target::Customers => state.customers.settle(ticket, response::decode(status, body)),
        Target::CustomerDetails => state.customer_details.settle(ticket, response::decode(status, body)),
        Target::TopFilms => {
            let outcome = response::decode(status, body);
            if let Err(failure) = &outcome {
                tracing::warn!(error = %failure, "failed to load top films");
            }
            state.top_films.settle(ticket, outcome)
        }
        Target::TopActors => {
            let outcome = response::decode(status, body);
            if let Err(failure) = &outcome {
                tracing::warn!(error = %failure, "failed to load top actors");
            }
            state.top_actors.settle(ticket, outcome)
        }
        Target::FilmDetails => state.film_details.settle(ticket, response::decode(status, body)),
        Target::ActorDetails => {
            let settled = state.actor_details.settle(ticket, response::decode(status, body));
            if settled && matches!(state.actor_details.state(), ViewState::Loaded(_)) {
                actions = state.load_actor_films()?;
            }
            settled
        }
        Target::FilmSearch => state.film_search.results.settle(ticket, response::decode(status, body)),
        Target::ActorFilms => {
            let outcome = response::decode(status, body);
            if let Err(failure) = &outcome {
                tracing::warn!(error = %failure, "failed to load actor films");
            }
            state.actor_films.settle(ticket, outcome)
        }
    };

    if !settled {
        return Ok(stale());
    }
    if response::is_unauthorized(status) && context.target != Target::Login && state.session.is_authenticated() {
        state.expire_session();
        return Ok((true, vec![]));
    }
    Ok((true, actions))
}

fn stale() -> (bool, Vec<Action>) {
    tracing::debug!("dropping stale response");
    (false, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, Method, DEFAULT_API_URL};
    use crate::app::state::{MISSING_CREDENTIALS, MISSING_SEARCH_TERM, SESSION_EXPIRED};
    use crate::domain::FilmSearchKind;
    use crate::ui::theme::Theme;
    use crate::ui::viewmodel::Content;

    const LOGIN_BODY: &[u8] = br#"{
        "message": "Login successful",
        "token": "tok-123",
        "staff": {"staff_id": 1, "first_name": "Mike", "last_name": "Hillyer", "username": "Mike", "active": 1}
    }"#;

    fn new_state() -> AppState {
        AppState::new(ApiClient::new(DEFAULT_API_URL).unwrap(), Theme::default(), 12)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn requests(actions: &[Action]) -> Vec<(&str, BTreeMap<String, String>)> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Request { call, context } => Some((call.url.as_str(), context.to_map())),
                Action::CloseFocus => None,
            })
            .collect()
    }

    fn respond(state: &mut AppState, action: &Action, status: u16, body: &[u8]) -> (bool, Vec<Action>) {
        let Action::Request { context, .. } = action else {
            panic!("expected a request action");
        };
        handle_event(
            state,
            &Event::ApiResponse {
                status,
                body: body.to_vec(),
                context: context.to_map(),
            },
        )
        .unwrap()
    }

    fn sign_in(state: &mut AppState) {
        type_text(state, "Mike");
        handle_event(state, &Event::Tab).unwrap();
        type_text(state, "12345");
        let (_, actions) = handle_event(state, &Event::Enter).unwrap();
        respond(state, &actions[0], 200, LOGIN_BODY);
    }

    fn signed_in() -> AppState {
        let mut state = new_state();
        sign_in(&mut state);
        state
    }

    #[test]
    fn empty_login_is_rejected_without_request() {
        let mut state = new_state();
        let (render, actions) = handle_event(&mut state, &Event::Enter).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.login.notice.as_deref(), Some(MISSING_CREDENTIALS));
    }

    #[test]
    fn login_posts_credentials_and_loads_dashboard() {
        let mut state = new_state();
        type_text(&mut state, "Mike");
        handle_event(&mut state, &Event::Tab).unwrap();
        type_text(&mut state, "12345");
        assert_eq!(state.login.password, "12345");

        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();
        assert_eq!(actions.len(), 1);
        let Action::Request { call, .. } = &actions[0] else {
            panic!("expected a request");
        };
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.url, "http://localhost:5000/api/auth/login");

        let (render, actions) = respond(&mut state, &actions[0], 200, LOGIN_BODY);
        assert!(render);
        assert_eq!(state.screen, Screen::Dashboard);
        assert_eq!(state.session.token(), Some("tok-123"));
        assert!(state.login.password.is_empty());

        let urls: Vec<&str> = requests(&actions).into_iter().map(|(url, _)| url).collect();
        assert_eq!(
            urls,
            vec!["http://localhost:5000/api/films/top5", "http://localhost:5000/api/actors/top5"]
        );
    }

    #[test]
    fn request_actions_debug_without_secrets() {
        let mut state = new_state();
        type_text(&mut state, "Mike");
        handle_event(&mut state, &Event::Tab).unwrap();
        type_text(&mut state, "hunter2");
        let (_, login) = handle_event(&mut state, &Event::Enter).unwrap();
        assert!(!format!("{login:?}").contains("hunter2"));
        assert!(!format!("{state:?}").contains("hunter2"));

        respond(&mut state, &login[0], 200, LOGIN_BODY);
        let (_, customers) = handle_event(&mut state, &Event::ShowCustomers).unwrap();
        assert!(!format!("{customers:?}").contains("tok-123"));
        assert!(!format!("{state:?}").contains("tok-123"));
    }

    #[test]
    fn failed_login_shows_reported_reason() {
        let mut state = new_state();
        type_text(&mut state, "Mike");
        handle_event(&mut state, &Event::Tab).unwrap();
        type_text(&mut state, "wrong");
        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();

        respond(&mut state, &actions[0], 401, br#"{"error": "Invalid credentials"}"#);
        assert_eq!(state.screen, Screen::Login);
        assert!(!state.session.is_authenticated());

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.notice.unwrap().text, "Invalid credentials");
    }

    #[test]
    fn stale_customer_response_is_dropped() {
        let mut state = signed_in();
        let (_, first) = handle_event(&mut state, &Event::ShowCustomers).unwrap();
        let (_, second) = handle_event(&mut state, &Event::Refresh).unwrap();

        let fresh = br#"[{"customer_id": 2, "first_name": "PATRICIA", "last_name": "JOHNSON",
            "email": "patricia@x.org", "address_id": 6, "active": true,
            "create_date": "2006-02-14", "last_update": "2006-02-15"}]"#;
        let (render, _) = respond(&mut state, &second[0], 200, fresh);
        assert!(render);

        let (render, _) = respond(&mut state, &first[0], 200, b"[]");
        assert!(!render);
        match state.customers.state() {
            ViewState::Loaded(records) => assert_eq!(records[0].customer_id, 2),
            other => panic!("expected loaded customers, got {other:?}"),
        }
    }

    #[test]
    fn unauthorized_response_expires_session() {
        let mut state = signed_in();
        let (_, actions) = handle_event(&mut state, &Event::ShowCustomers).unwrap();

        let (render, _) = respond(&mut state, &actions[0], 401, br#"{"error": "Token is invalid"}"#);
        assert!(render);
        assert_eq!(state.screen, Screen::Login);
        assert!(!state.session.is_authenticated());
        assert_eq!(state.login.notice.as_deref(), Some(SESSION_EXPIRED));
        assert!(state.customers.state().is_idle());
    }

    #[test]
    fn unauthorized_answer_from_previous_session_is_dropped() {
        let mut state = signed_in();
        let (_, old) = handle_event(&mut state, &Event::ShowCustomers).unwrap();
        handle_event(&mut state, &Event::Logout).unwrap();

        sign_in(&mut state);
        assert!(state.session.is_authenticated());
        let (_, current) = handle_event(&mut state, &Event::ShowCustomers).unwrap();
        assert_eq!(current.len(), 1);

        let (render, _) = respond(&mut state, &old[0], 401, br#"{"error": "Token is invalid"}"#);
        assert!(!render);
        assert!(state.session.is_authenticated());
        assert_eq!(state.screen, Screen::Customers);
        assert!(state.customers.state().is_loading());
    }

    #[test]
    fn logout_abandons_in_flight_requests() {
        let mut state = signed_in();
        let (_, actions) = handle_event(&mut state, &Event::ShowCustomers).unwrap();
        handle_event(&mut state, &Event::Logout).unwrap();

        let (render, _) = respond(&mut state, &actions[0], 200, b"[]");
        assert!(!render);
        assert!(state.customers.state().is_idle());
    }

    #[test]
    fn blank_search_term_is_rejected() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::ShowFilms).unwrap();
        assert_eq!(state.input_mode, InputMode::Typing);

        type_text(&mut state, "   ");
        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.film_search.notice.as_deref(), Some(MISSING_SEARCH_TERM));
        assert_eq!(state.input_mode, InputMode::Typing);
    }

    #[test]
    fn film_search_uses_selected_kind() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::ShowFilms).unwrap();
        handle_event(&mut state, &Event::Tab).unwrap();
        assert_eq!(state.film_search.kind, FilmSearchKind::Actor);

        type_text(&mut state, "PENELOPE GUINESS");
        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();
        let sent = requests(&actions);
        assert_eq!(
            sent[0].0,
            "http://localhost:5000/api/films/search/actor?q=PENELOPE+GUINESS"
        );
        assert_eq!(sent[0].1["target"], "film_search");
        assert_eq!(state.input_mode, InputMode::Normal);

        respond(&mut state, &actions[0], 500, br#"{"error": "database unavailable"}"#);
        let vm = state.compute_viewmodel(24, 80);
        match vm.content {
            Content::Message(message) => {
                assert_eq!(message.message, "database unavailable");
                assert!(message.is_error);
            }
            other => panic!("expected an error message, got {other:?}"),
        }
    }

    #[test]
    fn customer_filter_types_live() {
        let mut state = signed_in();
        let (_, actions) = handle_event(&mut state, &Event::ShowCustomers).unwrap();
        let body = br#"[
            {"customer_id": 1, "first_name": "MARY", "last_name": "SMITH", "email": "a@x.com",
             "address_id": 5, "active": true, "create_date": "2006-02-14", "last_update": "2006-02-15"},
            {"customer_id": 2, "first_name": "PATRICIA", "last_name": "JOHNSON", "email": "b@y.com",
             "address_id": 6, "active": true, "create_date": "2006-02-14", "last_update": "2006-02-15"}
        ]"#;
        respond(&mut state, &actions[0], 200, body);

        // Letters are commands until the filter is focused.
        let (render, _) = handle_event(&mut state, &Event::Char('a')).unwrap();
        assert!(!render);

        handle_event(&mut state, &Event::FocusInput).unwrap();
        type_text(&mut state, "a@x");
        assert_eq!(state.customers.visible_slice().total_count, 1);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.customers.query(), "a@x");
    }

    #[test]
    fn actor_details_follow_up_with_films() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::ShowFilms).unwrap();
        let actions = state.navigate(Screen::ActorDetails(1)).unwrap();
        let actor = br#"{"actor_id": 1, "first_name": "PENELOPE", "last_name": "GUINESS",
            "full_name": "PENELOPE GUINESS", "last_update": "2006-02-15"}"#;
        let (_, follow_up) = respond(&mut state, &actions[0], 200, actor);

        let sent = requests(&follow_up);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1["target"], "actor_films");
        assert!(sent[0].0.ends_with("/films/search/actor?q=PENELOPE+GUINESS"));

        respond(&mut state, &follow_up[0], 200, b"[]");
        assert!(matches!(state.actor_films.state(), ViewState::Loaded(_)));
    }

    #[test]
    fn commands_need_a_session() {
        let mut state = new_state();
        let (render, actions) = handle_event(&mut state, &Event::ShowCustomers).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.screen, Screen::Login);
    }

    #[test]
    fn denied_permission_sets_banner() {
        let mut state = new_state();
        handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.notice.unwrap().text, PERMISSION_DENIED);
    }

    #[test]
    fn response_without_context_is_ignored() {
        let mut state = signed_in();
        let (render, actions) = handle_event(
            &mut state,
            &Event::ApiResponse {
                status: 200,
                body: b"[]".to_vec(),
                context: BTreeMap::new(),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }
}
