//! Slot names the policy treats specially
//!
//! Slot names are opaque strings everywhere else; the ontology is the
//! authority on which ones exist.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Movie slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Title,
    Genres,
    Plot,
    Keywords,
    Directors,
    Duration,
    Actors,
    Year,
    /// Generic "tell me more" request
    MoreInfo,
    Rating,
    ImdbLink,
    CoverImage,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Title => "title",
            Slot::Genres => "genres",
            Slot::Plot => "plot",
            Slot::Keywords => "keywords",
            Slot::Directors => "directors",
            Slot::Duration => "duration",
            Slot::Actors => "actors",
            Slot::Year => "year",
            Slot::MoreInfo => "more_info",
            Slot::Rating => "rating",
            Slot::ImdbLink => "imdb_link",
            Slot::CoverImage => "cover_image",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<Slot> for str {
    fn eq(&self, other: &Slot) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<Slot> for String {
    fn eq(&self, other: &Slot) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Parameter slot of a `COUNT_RESULTS` act
pub const COUNT_SLOT: &str = "count";

/// Parameter slot carrying the item title when an inquiry cannot be answered
pub const DENY_SLOT: &str = "deny";

/// Parameter slots of a `WELCOME` act
pub const NEW_USER_SLOT: &str = "new_user";
pub const IS_BOT_SLOT: &str = "is_bot";
