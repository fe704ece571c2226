//! Turns [`ApiRequest`]s into fully resolved HTTP calls.

use super::request::{ApiRequest, Method};
use crate::domain::{RentalDeskError, Result, REDACTED};
use crate::session::SessionContext;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Base URL used when the plugin configuration names none.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// A request ready to hand to the host's HTTP facility.
///
/// `Debug` hides the `Authorization` value and shows only the body length,
/// since login bodies carry the password.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpCall {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl fmt::Debug for HttpCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(name, value)| {
                let value = if name.eq_ignore_ascii_case("authorization") {
                    REDACTED
                } else {
                    value.as_str()
                };
                (name.as_str(), value)
            })
            .collect();

        f.debug_struct("HttpCall")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Resolves endpoints against a base URL and attaches credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base: Url,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse or cannot carry a path
    /// (e.g. `mailto:` URLs).
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim())?;
        if base.cannot_be_a_base() {
            return Err(RentalDeskError::Config(format!("api_url cannot be a base URL: {base_url}")));
        }
        Ok(Self { base })
    }

    /// Builds the HTTP call for `request`.
    ///
    /// Authenticated endpoints get `Authorization: Bearer <token>` from the
    /// session; JSON bodies get a `Content-Type` header.
    ///
    /// # Errors
    ///
    /// Returns [`RentalDeskError::Session`] when an authenticated endpoint is
    /// requested without a session, or a serialization error for the body.
    pub fn build(&self, request: &ApiRequest, session: &SessionContext) -> Result<HttpCall> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| RentalDeskError::Config(format!("api_url cannot be a base URL: {}", self.base)))?
            .pop_if_empty()
            .extend(request.segments());

        let query = request.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        if request.requires_auth() {
            let token = session
                .token()
                .ok_or_else(|| RentalDeskError::Session(format!("{} requires a signed-in session", request.target())))?;
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        let body = match request.body()? {
            Some(body) => {
                headers.insert("Content-Type".to_string(), "application/json".to_string());
                body
            }
            None => Vec::new(),
        };

        tracing::debug!(url = %url, method = ?request.method(), target = %request.target(), "built api call");

        Ok(HttpCall {
            url: url.into(),
            method: request.method(),
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Credentials, FilmSearchKind, LoginResponse, Staff};

    fn signed_in() -> SessionContext {
        let mut session = SessionContext::default();
        session
            .establish(LoginResponse {
                message: "ok".into(),
                token: "tok-123".into(),
                staff: Staff {
                    staff_id: 1,
                    first_name: "Mike".into(),
                    last_name: "Hillyer".into(),
                    username: "Mike".into(),
                    active: 1,
                },
            })
            .unwrap();
        session
    }

    #[test]
    fn joins_paths_below_the_base() {
        let client = ApiClient::new(DEFAULT_API_URL).unwrap();
        let session = signed_in();

        let call = client.build(&ApiRequest::Customers, &session).unwrap();
        assert_eq!(call.url, "http://localhost:5000/api/customers/");

        let call = client.build(&ApiRequest::FilmDetails(42), &session).unwrap();
        assert_eq!(call.url, "http://localhost:5000/api/films/42");
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let client = ApiClient::new("https://rentals.example/api/").unwrap();
        let call = client.build(&ApiRequest::TopActors, &signed_in()).unwrap();
        assert_eq!(call.url, "https://rentals.example/api/actors/top5");
    }

    #[test]
    fn search_term_is_query_encoded() {
        let call = ApiClient::new(DEFAULT_API_URL).unwrap()
            .build(
                &ApiRequest::SearchFilms {
                    kind: FilmSearchKind::Actor,
                    term: "penelope guiness&co".into(),
                },
                &signed_in(),
            )
            .unwrap();
        assert_eq!(
            call.url,
            "http://localhost:5000/api/films/search/actor?q=penelope+guiness%26co"
        );
    }

    #[test]
    fn bearer_header_comes_from_session() {
        let call = ApiClient::new(DEFAULT_API_URL).unwrap().build(&ApiRequest::TopFilms, &signed_in()).unwrap();
        assert_eq!(call.headers.get("Authorization").map(String::as_str), Some("Bearer tok-123"));
        assert!(call.body.is_empty());
        assert!(!call.headers.contains_key("Content-Type"));
    }

    #[test]
    fn authenticated_call_without_session_fails() {
        let result = ApiClient::new(DEFAULT_API_URL).unwrap().build(&ApiRequest::TopFilms, &SessionContext::default());
        assert!(matches!(result, Err(RentalDeskError::Session(_))));
    }

    #[test]
    fn login_posts_json_without_bearer() {
        let request = ApiRequest::Login(Credentials {
            username: "Mike".into(),
            password: "pw".into(),
        });
        let call = ApiClient::new(DEFAULT_API_URL).unwrap().build(&request, &SessionContext::default()).unwrap();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.url, "http://localhost:5000/api/auth/login");
        assert_eq!(call.headers.get("Content-Type").map(String::as_str), Some("application/json"));
        assert!(!call.headers.contains_key("Authorization"));
        assert!(!call.body.is_empty());
    }

    #[test]
    fn debug_output_hides_credentials() {
        let client = ApiClient::new(DEFAULT_API_URL).unwrap();

        let bearer = client.build(&ApiRequest::Customers, &signed_in()).unwrap();
        let shown = format!("{bearer:?}");
        assert!(shown.contains("/customers/"));
        assert!(!shown.contains("tok-123"));

        let login = ApiRequest::Login(Credentials {
            username: "Mike".into(),
            password: "hunter2".into(),
        });
        assert!(!format!("{login:?}").contains("hunter2"));
        let call = client.build(&login, &SessionContext::default()).unwrap();
        assert!(!format!("{call:?}").contains("hunter2"));
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(matches!(ApiClient::new("not a url"), Err(RentalDeskError::Url(_))));
        assert!(matches!(ApiClient::new("mailto:desk@example.com"), Err(RentalDeskError::Config(_))));
    }
}
