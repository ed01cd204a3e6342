//! Preference vocabulary
//!
//! The fixed set of category strings a user may prefer and a blog may be
//! tagged with. On the wire every variant is its lower-case name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// One category from the shared preference/tag vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Tech,
    Science,
    Music,
    Art,
    Sports,
    Travel,
    Food,
    Health,
    Fashion,
    Politics,
    Business,
    Education,
    Entertainment,
    Gaming,
    Lifestyle,
    History,
}

impl Preference {
    /// Every vocabulary entry, in the order it is listed to clients
    pub const ALL: [Preference; 16] = [
        Preference::Tech,
        Preference::Science,
        Preference::Music,
        Preference::Art,
        Preference::Sports,
        Preference::Travel,
        Preference::Food,
        Preference::Health,
        Preference::Fashion,
        Preference::Politics,
        Preference::Business,
        Preference::Education,
        Preference::Entertainment,
        Preference::Gaming,
        Preference::Lifestyle,
        Preference::History,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Tech => "tech",
            Preference::Science => "science",
            Preference::Music => "music",
            Preference::Art => "art",
            Preference::Sports => "sports",
            Preference::Travel => "travel",
            Preference::Food => "food",
            Preference::Health => "health",
            Preference::Fashion => "fashion",
            Preference::Politics => "politics",
            Preference::Business => "business",
            Preference::Education => "education",
            Preference::Entertainment => "entertainment",
            Preference::Gaming => "gaming",
            Preference::Lifestyle => "lifestyle",
            Preference::History => "history",
        }
    }

    /// Comma-separated vocabulary, used in validation messages
    pub fn vocabulary() -> String {
        Self::ALL
            .iter()
            .map(Preference::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SharedError::unknown_preference(s))
    }
}
