//! Decoding of API responses into records or fetch failures.

use crate::collection::FetchFailure;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Status the API answers with when the bearer token is missing or expired.
pub const UNAUTHORIZED: u16 = 401;

/// Error envelope used by every API route: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[must_use]
pub const fn is_success(status: u16) -> bool {
    200 <= status && status < 300
}

#[must_use]
pub const fn is_unauthorized(status: u16) -> bool {
    status == UNAUTHORIZED
}

/// The `error` field of a failed response, if the body carries one.
#[must_use]
pub fn error_reason(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body).ok().and_then(|envelope| envelope.error)
}

/// Decodes a response body into `T`.
///
/// Non-2xx responses become a failure with the body's `error` reason. A 2xx
/// body that does not match `T` becomes an unreported failure so the view
/// falls back to its default message.
///
/// # Errors
///
/// Returns [`FetchFailure`] as described above.
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, FetchFailure> {
    if !is_success(status) {
        let reason = error_reason(body);
        tracing::debug!(status, reason = ?reason, "api returned an error status");
        return Err(FetchFailure::from_reason(reason));
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(status, error = %e, "failed to decode api response");
        FetchFailure::Unreported
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TopFilm;

    #[test]
    fn decodes_success_body() {
        let films: Vec<TopFilm> =
            decode(200, br#"[{"film_id": 103, "title": "BUCKET BROTHERHOOD", "rentals": 34}]"#).unwrap();
        assert_eq!(films.len(), 1);
        assert_eq!(films[0].rentals, 34);
    }

    #[test]
    fn error_status_surfaces_reason() {
        let result: Result<Vec<TopFilm>, _> = decode(404, br#"{"error": "Film not found"}"#);
        assert_eq!(result, Err(FetchFailure::Reported("Film not found".into())));
    }

    #[test]
    fn error_status_without_envelope_is_unreported() {
        let result: Result<Vec<TopFilm>, _> = decode(502, b"<html>Bad Gateway</html>");
        assert_eq!(result, Err(FetchFailure::Unreported));

        let result: Result<Vec<TopFilm>, _> = decode(500, br#"{"message": "boom"}"#);
        assert_eq!(result, Err(FetchFailure::Unreported));
    }

    #[test]
    fn malformed_success_body_is_unreported() {
        let result: Result<Vec<TopFilm>, _> = decode(200, br#"{"unexpected": true}"#);
        assert_eq!(result, Err(FetchFailure::Unreported));
    }

    #[test]
    fn status_classes() {
        assert!(is_success(204));
        assert!(!is_success(301));
        assert!(is_unauthorized(401));
        assert!(!is_unauthorized(403));
    }
}
