//! Actor records served by `/actors`.

use super::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub actor_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl Record for Actor {
    type Id = i64;

    fn id(&self) -> i64 {
        self.actor_id
    }
}

/// Entry of the "top 5 actors in store" ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopActor {
    pub actor_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub films_in_store: i64,
}

impl TopActor {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for TopActor {
    type Id = i64;

    fn id(&self) -> i64 {
        self.actor_id
    }
}
