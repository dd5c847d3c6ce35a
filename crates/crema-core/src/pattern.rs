//! Pattern categories and the fixed complexity table.

use serde::{Deserialize, Serialize};

/// Named category of a poured milk design.
///
/// Serialized with the labels the history file and upstream template
/// use, including the two-word `"No Art"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    Tulip,
    Rosetta,
    Heart,
    Swan,
    Uncertain,
    #[serde(rename = "No Art")]
    NoArt,
}

impl Pattern {
    /// Normalize an extracted classification label.
    ///
    /// Closed-world: only the four named patterns map to themselves
    /// (case-insensitive, exact); everything else is `Uncertain`.
    /// Partial matches are deliberately not attempted.
    pub fn from_label(label: &str) -> Self {
        let cleaned = label.trim().trim_end_matches('.').trim();
        match cleaned.to_lowercase().as_str() {
            "tulip" => Pattern::Tulip,
            "rosetta" => Pattern::Rosetta,
            "heart" => Pattern::Heart,
            "swan" => Pattern::Swan,
            _ => Pattern::Uncertain,
        }
    }

    /// Fixed 1-5 complexity rank, independent of execution quality.
    pub fn complexity(&self) -> u8 {
        match self {
            Pattern::Swan => 5,
            Pattern::Rosetta => 4,
            Pattern::Tulip => 3,
            Pattern::Heart => 2,
            Pattern::Uncertain | Pattern::NoArt => 1,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Tulip => write!(f, "Tulip"),
            Pattern::Rosetta => write!(f, "Rosetta"),
            Pattern::Heart => write!(f, "Heart"),
            Pattern::Swan => write!(f, "Swan"),
            Pattern::Uncertain => write!(f, "Uncertain"),
            Pattern::NoArt => write!(f, "No Art"),
        }
    }
}
