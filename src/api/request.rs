//! Catalogue of the endpoints the plugin consumes.

use crate::domain::{Credentials, FilmSearchKind, Result};
use std::fmt;
use std::str::FromStr;

/// HTTP verb of an API call.
///
/// Mirrors the subset of verbs the host can issue so the library does not
/// depend on the plugin runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// The view a response is destined for.
///
/// Carried through the request context so a `WebRequestResult` can be routed
/// back to the controller or resource that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Login,
    Customers,
    CustomerDetails,
    TopFilms,
    TopActors,
    FilmDetails,
    ActorDetails,
    FilmSearch,

    /// The film search run for an actor's filmography.
    ActorFilms,
}

impl Target {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Customers => "customers",
            Self::CustomerDetails => "customer_details",
            Self::TopFilms => "top_films",
            Self::TopActors => "top_actors",
            Self::FilmDetails => "film_details",
            Self::ActorDetails => "actor_details",
            Self::FilmSearch => "film_search",
            Self::ActorFilms => "actor_films",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "customers" => Ok(Self::Customers),
            "customer_details" => Ok(Self::CustomerDetails),
            "top_films" => Ok(Self::TopFilms),
            "top_actors" => Ok(Self::TopActors),
            "film_details" => Ok(Self::FilmDetails),
            "actor_details" => Ok(Self::ActorDetails),
            "film_search" => Ok(Self::FilmSearch),
            "actor_films" => Ok(Self::ActorFilms),
            other => Err(format!("unknown request target: {other}")),
        }
    }
}

/// One call against the rental API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// `POST /auth/login`
    Login(Credentials),
    /// `GET /customers/`
    Customers,
    /// `GET /customers/{id}`
    CustomerDetails(i64),
    /// `GET /films/top5`
    TopFilms,
    /// `GET /actors/top5`
    TopActors,
    /// `GET /films/{id}`
    FilmDetails(i64),
    /// `GET /actors/{id}`
    ActorDetails(i64),
    /// `GET /films/search/{kind}?q={term}`
    SearchFilms { kind: FilmSearchKind, term: String },
}

impl ApiRequest {
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Login(_) => Method::Post,
            _ => Method::Get,
        }
    }

    #[must_use]
    pub const fn target(&self) -> Target {
        match self {
            Self::Login(_) => Target::Login,
            Self::Customers => Target::Customers,
            Self::CustomerDetails(_) => Target::CustomerDetails,
            Self::TopFilms => Target::TopFilms,
            Self::TopActors => Target::TopActors,
            Self::FilmDetails(_) => Target::FilmDetails,
            Self::ActorDetails(_) => Target::ActorDetails,
            Self::SearchFilms { .. } => Target::FilmSearch,
        }
    }

    /// Whether the call needs the session's bearer token.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login(_))
    }

    /// Path segments below the base URL. A trailing empty segment yields a
    /// trailing slash, which the customers collection route expects.
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        match self {
            Self::Login(_) => vec!["auth".into(), "login".into()],
            Self::Customers => vec!["customers".into(), String::new()],
            Self::CustomerDetails(id) => vec!["customers".into(), id.to_string()],
            Self::TopFilms => vec!["films".into(), "top5".into()],
            Self::TopActors => vec!["actors".into(), "top5".into()],
            Self::FilmDetails(id) => vec!["films".into(), id.to_string()],
            Self::ActorDetails(id) => vec!["actors".into(), id.to_string()],
            Self::SearchFilms { kind, .. } => vec!["films".into(), "search".into(), kind.segment().into()],
        }
    }

    /// Query string pairs, already unencoded.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::SearchFilms { term, .. } => vec![("q", term.as_str())],
            _ => Vec::new(),
        }
    }

    /// JSON body, if the call sends one.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn body(&self) -> Result<Option<Vec<u8>>> {
        match self {
            Self::Login(credentials) => Ok(Some(serde_json::to_vec(credentials)?)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_names_round_trip() {
        for target in [
            Target::Login,
            Target::Customers,
            Target::CustomerDetails,
            Target::TopFilms,
            Target::TopActors,
            Target::FilmDetails,
            Target::ActorDetails,
            Target::FilmSearch,
            Target::ActorFilms,
        ] {
            assert_eq!(target.as_str().parse::<Target>(), Ok(target));
        }
        assert!("rentals".parse::<Target>().is_err());
    }

    #[test]
    fn only_login_posts_and_skips_auth() {
        let login = ApiRequest::Login(Credentials {
            username: "Mike".into(),
            password: "secret".into(),
        });
        assert_eq!(login.method(), Method::Post);
        assert!(!login.requires_auth());

        let body = login.body().unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["username"], "Mike");

        assert_eq!(ApiRequest::TopFilms.method(), Method::Get);
        assert!(ApiRequest::TopFilms.requires_auth());
        assert!(ApiRequest::TopFilms.body().unwrap().is_none());
    }

    #[test]
    fn search_carries_term_as_query() {
        let search = ApiRequest::SearchFilms {
            kind: FilmSearchKind::Genre,
            term: "Sci-Fi".into(),
        };
        assert_eq!(search.segments(), vec!["films", "search", "genre"]);
        assert_eq!(search.query(), vec![("q", "Sci-Fi")]);
        assert_eq!(search.target(), Target::FilmSearch);
    }
}
