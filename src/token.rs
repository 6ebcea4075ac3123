//! Name tokenization and casing.

use serde::{Deserialize, Serialize};

/// A single whitespace-delimited unit of an input name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameToken {
    /// The token exactly as it appeared in the input.
    pub raw: String,
    /// The token in title case, the casing the lexicon is indexed by.
    pub title: String,
}

impl NameToken {
    /// Creates a token from raw text.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let title = title_case(&raw);
        Self { raw, title }
    }
}

impl AsRef<str> for NameToken {
    fn as_ref(&self) -> &str {
        self.raw.as_str()
    }
}

/// Splits a name on Unicode whitespace.
///
/// Blank input yields no tokens.
#[must_use]
pub fn tokenize(name: &str) -> Vec<NameToken> {
    name.split_whitespace().map(NameToken::new).collect()
}

/// Title-cases a word: the first letter of every alphabetic run is
/// uppercased and the rest lowercased.
///
/// ```
/// use nafnaleit::token::title_case;
///
/// assert_eq!(title_case("sævari"), "Sævari");
/// assert_eq!(title_case("ÞÓRA"), "Þóra");
/// ```
#[must_use]
pub fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_word = false;
    for ch in word.chars() {
        if in_word {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        in_word = ch.is_alphabetic();
    }
    out
}

/// Title-cases every whitespace-separated word and joins with single spaces.
#[must_use]
pub fn title_case_name(name: &str) -> String {
    name.split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}
