//! Grammatical gender labels for personal names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender inferred for a name or name part.
///
/// Derived from the lexicon's grammatical category (`kk` masculine,
/// `kvk` feminine) or from a patronymic suffix. Everything else,
/// including neuter (`hk`), is [`Gender::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Masculine (`kk`).
    Male,
    /// Feminine (`kvk`).
    Female,
    /// No usable gender information.
    #[default]
    Unknown,
}

impl Gender {
    /// Maps a BÍN word category to a gender.
    #[must_use]
    pub fn from_category(category: &str) -> Self {
        match category {
            "kk" => Self::Male,
            "kvk" => Self::Female,
            _ => Self::Unknown,
        }
    }

    /// Returns true for [`Gender::Male`] and [`Gender::Female`].
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns the BÍN category tag, if any.
    #[must_use]
    pub const fn category(self) -> Option<&'static str> {
        match self {
            Self::Male => Some("kk"),
            Self::Female => Some("kvk"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
