//! Film catalog records served by `/films`.

use super::actor::Actor;
use super::Record;
use serde::{Deserialize, Serialize};

/// A film with its optional cast and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub film_id: i64,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub language_id: i64,
    #[serde(default)]
    pub original_language_id: Option<i64>,
    pub rental_duration: i32,
    pub rental_rate: f64,
    pub length: i32,
    pub replacement_cost: f64,
    pub rating: String,
    #[serde(default)]
    pub special_features: Vec<String>,
    pub last_update: String,
    #[serde(default)]
    pub actors: Option<Vec<Actor>>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Maximum description length shown in result rows.
const SUMMARY_CHARS: usize = 100;

impl Film {
    /// Description cut to 100 characters with a trailing ellipsis.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.description.chars().count() > SUMMARY_CHARS {
            let cut: String = self.description.chars().take(SUMMARY_CHARS).collect();
            format!("{cut}...")
        } else {
            self.description.clone()
        }
    }

    /// Cast list, empty when the API omitted it.
    #[must_use]
    pub fn cast(&self) -> &[Actor] {
        self.actors.as_deref().unwrap_or_default()
    }
}

impl Record for Film {
    type Id = i64;

    fn id(&self) -> i64 {
        self.film_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub name: String,
}

/// Entry of the "top 5 rented films" ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopFilm {
    pub film_id: i64,
    pub title: String,
    pub rentals: i64,
}

impl Record for TopFilm {
    type Id = i64;

    fn id(&self) -> i64 {
        self.film_id
    }
}

/// Which server-side index a film search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilmSearchKind {
    #[default]
    Title,
    Actor,
    Genre,
}

impl FilmSearchKind {
    /// Path segment under `/films/search/`.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Actor => "actor",
            Self::Genre => "genre",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "By Title",
            Self::Actor => "By Actor",
            Self::Genre => "By Genre",
        }
    }

    /// Cycles title → actor → genre → title.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Actor,
            Self::Actor => Self::Genre,
            Self::Genre => Self::Title,
        }
    }
}
