//! Domain layer for the rentaldesk plugin.
//!
//! This module contains the catalog record types exactly as the rental API
//! serves them, plus the crate error type. It is independent of Zellij, HTTP
//! transport and rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`customer`]: Customers and their address chain
//! - [`film`]: Films, categories, rankings and search kinds
//! - [`actor`]: Actors and rankings
//! - [`staff`]: Staff identity and login payloads

pub mod actor;
pub mod customer;
pub mod error;
pub mod film;
pub mod staff;

pub use actor::{Actor, TopActor};
pub use customer::{Customer, CustomerDetails};
pub use error::{RentalDeskError, Result};
pub use film::{Category, Film, FilmSearchKind, TopFilm};
pub use staff::{Credentials, LoginResponse, Staff, REDACTED};

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// A catalog item with a stable unique identifier.
pub trait Record {
    type Id: Eq + Clone + std::fmt::Display;

    fn id(&self) -> Self::Id;
}

/// Formats an API timestamp as a calendar date (`YYYY-MM-DD`).
///
/// Accepts RFC 3339, RFC 2822 (the HTTP date style some JSON encoders emit)
/// and naive `YYYY-MM-DD[T ]HH:MM:SS` forms. Anything else is returned as is.
///
/// # Examples
///
/// ```
/// use rentaldesk::domain::display_date;
///
/// assert_eq!(display_date("Tue, 14 Feb 2006 22:04:36 GMT"), "2006-02-14");
/// assert_eq!(display_date("2006-02-14 22:04:36"), "2006-02-14");
/// assert_eq!(display_date("someday"), "someday");
/// ```
#[must_use]
pub fn display_date(raw: &str) -> String {
    const FORMAT: &str = "%Y-%m-%d";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(FORMAT).to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return parsed.format(FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return parsed.format(FORMAT).to_string();
        }
    }
    NaiveDate::parse_from_str(raw, FORMAT)
        .map_or_else(|_| raw.to_string(), |date| date.format(FORMAT).to_string())
}
