//! Error types for the rentaldesk plugin.
//!
//! This module defines the crate-wide error type [`RentalDeskError`] and a
//! [`Result`] alias. Fetch failures of individual views are not errors at this
//! level: they are captured into view state as
//! [`FetchFailure`](crate::collection::FetchFailure).

use thiserror::Error;

/// The main error type for rentaldesk operations.
///
/// # Examples
///
/// ```
/// use rentaldesk::domain::RentalDeskError;
///
/// fn validate_page_size(size: usize) -> Result<usize, RentalDeskError> {
///     if size == 0 {
///         return Err(RentalDeskError::Config("page_size must be positive".to_string()));
///     }
///     Ok(size)
/// }
///
/// assert!(validate_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum RentalDeskError {
    /// The API answered in a way the plugin cannot act on.
    #[error("API error: {0}")]
    Api(String),

    /// A JSON payload could not be encoded or decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request URL could not be built from the configured base URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation needed a signed-in staff member and there was none.
    #[error("Session error: {0}")]
    Session(String),
}

/// A specialized `Result` type for rentaldesk operations.
pub type Result<T> = std::result::Result<T, RentalDeskError>;
