//! Abstract lexicon trait.
//!
//! The resolver only ever reads from the lexicon, so the trait is a pair of
//! read-only lookups. Backends may cache or pool behind it freely.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gender::Gender;

/// Identifier of a lemma (a BÍN `id`). All inflected forms of a lemma share it.
pub type LemmaId = u32;

/// Errors that can occur during lexicon lookups.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The lexicon could not be reached or opened.
    #[error("Lexicon unavailable: {0}")]
    Unavailable(String),

    /// Backend error.
    #[error("Lexicon backend error: {0}")]
    Backend(String),

    /// A source line could not be parsed.
    #[error("Malformed lexicon line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// I/O failure while reading a lexicon source.
    #[error("Lexicon I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One inflected form of a lemma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordForm {
    /// Dictionary form, e.g. `Björn`.
    pub lemma: String,
    /// Id shared by every form of the lemma.
    pub lemma_id: LemmaId,
    /// Word category, e.g. `kk`, `kvk`, `hk`.
    pub category: String,
    /// Lexicon domain, e.g. `ism` (given name), `föð` (patronymic).
    pub domain: String,
    /// The inflected form itself.
    pub form: String,
    /// Inflection mark, e.g. `ÞGFET`.
    pub mark: String,
}

impl WordForm {
    /// Creates a word form row.
    #[must_use]
    pub fn new(
        lemma: impl Into<String>,
        lemma_id: LemmaId,
        category: impl Into<String>,
        domain: impl Into<String>,
        form: impl Into<String>,
        mark: impl Into<String>,
    ) -> Self {
        Self {
            lemma: lemma.into(),
            lemma_id,
            category: category.into(),
            domain: domain.into(),
            form: form.into(),
            mark: mark.into(),
        }
    }
}

/// A lemma candidate for a looked-up word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LexicalEntry {
    /// Canonical (nominative) form.
    pub lemma: String,
    /// Word category the lemma is listed under.
    pub category: String,
    /// Lexicon domain of the lemma.
    pub domain: String,
    /// Identifier used for re-declension lookups.
    pub lemma_id: LemmaId,
}

impl LexicalEntry {
    /// Gender implied by the entry's category.
    #[must_use]
    pub fn gender(&self) -> Gender {
        Gender::from_category(&self.category)
    }
}

impl From<&WordForm> for LexicalEntry {
    fn from(form: &WordForm) -> Self {
        Self {
            lemma: form.lemma.clone(),
            category: form.category.clone(),
            domain: form.domain.clone(),
            lemma_id: form.lemma_id,
        }
    }
}

/// Read-only morphological dictionary.
///
/// Lookups are exact on the form; callers are responsible for casing
/// (names are indexed title-cased).
pub trait Lexicon: Send + Sync {
    /// All word-form rows whose form equals `word`, in lexicon order.
    fn lookup(&self, word: &str) -> Result<Vec<WordForm>, LexiconError>;

    /// All inflected forms of the lemma with the given id.
    fn lookup_id(&self, id: LemmaId) -> Result<Vec<WordForm>, LexiconError>;

    /// Distinct lemma candidates for `word`, in first-seen order.
    ///
    /// Two rows are the same candidate when lemma, category and id agree.
    fn lookup_lemmas(&self, word: &str) -> Result<Vec<LexicalEntry>, LexiconError> {
        let mut out: Vec<LexicalEntry> = Vec::new();
        for form in self.lookup(word)? {
            let entry = LexicalEntry::from(&form);
            if !out.contains(&entry) {
                out.push(entry);
            }
        }
        Ok(out)
    }
}
