//! Explicit session context for the signed-in staff member.
//!
//! The session is owned by the application state and passed to whoever needs
//! the bearer token. It is established on a successful login and torn down on
//! logout or when the API rejects the token; there is no ambient storage.

use crate::domain::{LoginResponse, RentalDeskError, Result, Staff, REDACTED};
use std::fmt;

/// Bearer token plus the staff record it belongs to.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub staff: Staff,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &REDACTED)
            .field("staff", &self.staff)
            .finish()
    }
}

/// Holds at most one [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    /// Starts a session from a login response, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`RentalDeskError::Session`] if the response carries an empty
    /// token.
    pub fn establish(&mut self, login: LoginResponse) -> Result<&Session> {
        if login.token.trim().is_empty() {
            return Err(RentalDeskError::Session("login response carried no token".to_string()));
        }

        tracing::info!(staff_id = login.staff.staff_id, username = %login.staff.username, "session established");
        Ok(self.current.insert(Session {
            token: login.token,
            staff: login.staff,
        }))
    }

    /// Ends the session. Returns the staff member who was signed in, if any.
    pub fn teardown(&mut self) -> Option<Staff> {
        let ended = self.current.take().map(|session| session.staff);
        if let Some(staff) = &ended {
            tracing::info!(staff_id = staff.staff_id, "session torn down");
        }
        ended
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.token.as_str())
    }

    #[must_use]
    pub fn staff(&self) -> Option<&Staff> {
        self.current.as_ref().map(|session| &session.staff)
    }
}
