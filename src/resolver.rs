//! Morphological resolver: inflected name → nominative candidates.
//!
//! Each token is looked up in the lexicon under its title-cased form. Tokens
//! with no usable hit fall back to the patronymic suffix heuristic. The
//! given-name position may yield several lemmas (e.g. "Birni" is a form of
//! both "Björn" and "Birnir"); every other position resolves to a single
//! reading. Candidates are then filtered on gender agreement between parts.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{NafnResult, ValidationError};
use crate::gender::Gender;
use crate::lexicon::Lexicon;
use crate::suffix::nominative_from_suffix;
use crate::token::{tokenize, NameToken};

/// Lexicon domains that hold personal names: given names, nicknames,
/// patronymics, matronymics and foreign given names.
pub const PERSONAL_NAME_DOMAINS: [&str; 5] = ["ism", "gæl", "föð", "móð", "erm"];

/// Resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Upper bound on returned candidates.
    pub max_candidates: usize,
    /// Lexicon domains accepted as hits. Empty accepts every domain.
    pub name_domains: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_candidates: 16,
            name_domains: Vec::new(),
        }
    }
}

impl ResolverConfig {
    /// Default config restricted to [`PERSONAL_NAME_DOMAINS`].
    #[must_use]
    pub fn personal_names() -> Self {
        Self {
            name_domains: PERSONAL_NAME_DOMAINS.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Checks field values.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidConfig`] if `max_candidates` is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_candidates == 0 {
            return Err(ValidationError::InvalidConfig {
                field: "max_candidates".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn accepts_domain(&self, domain: &str) -> bool {
        self.name_domains.is_empty() || self.name_domains.iter().any(|d| d == domain)
    }
}

/// A fully assembled nominative name candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCandidate {
    /// Space-joined nominative name.
    pub name: String,
    /// Gender agreed on by the gendered parts.
    pub gender: Gender,
    /// Set when the parts disagree on gender and the candidate was kept
    /// only because nothing else survived.
    #[serde(default)]
    pub gender_conflict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadingSource {
    Lexicon,
    Suffix,
    Echo,
}

/// One possible nominative reading of a single token.
#[derive(Debug, Clone)]
struct Reading {
    text: String,
    gender: Gender,
    source: ReadingSource,
}

/// Resolves inflected Icelandic names to nominative candidates.
///
/// Stateless apart from the shared lexicon handle; safe to share across
/// threads.
#[derive(Clone)]
pub struct Resolver {
    lexicon: Arc<dyn Lexicon>,
    config: ResolverConfig,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Creates a resolver with the default configuration.
    #[must_use]
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self {
            lexicon,
            config: ResolverConfig::default(),
        }
    }

    /// Creates a resolver with a validated configuration.
    ///
    /// # Errors
    /// Returns the validation error if `config` is invalid.
    pub fn with_config(
        lexicon: Arc<dyn Lexicon>,
        config: ResolverConfig,
    ) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { lexicon, config })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns the lexicon handle.
    #[must_use]
    pub fn lexicon(&self) -> &dyn Lexicon {
        self.lexicon.as_ref()
    }

    /// Nominative candidate names for `name`.
    ///
    /// Blank input yields an empty list without touching the lexicon.
    ///
    /// # Errors
    /// Propagates lexicon failures.
    pub fn resolve_nominative(&self, name: &str) -> NafnResult<Vec<String>> {
        Ok(self
            .resolve_nominative_with_gender(name)?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    /// Nominative candidates for `name` with gender labels.
    ///
    /// # Errors
    /// Propagates lexicon failures.
    pub fn resolve_nominative_with_gender(&self, name: &str) -> NafnResult<Vec<NameCandidate>> {
        let tokens = tokenize(name);
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(Vec::new());
        };

        let first_readings = self.readings(first)?;
        let mut rest_readings = Vec::with_capacity(rest.len());
        for token in rest {
            let mut readings = self.readings(token)?;
            // readings() never returns an empty list
            rest_readings.push(readings.swap_remove(0));
        }

        let assembled: Vec<NameCandidate> = first_readings
            .iter()
            .map(|first| {
                let parts: Vec<&Reading> =
                    std::iter::once(first).chain(rest_readings.iter()).collect();
                assemble(&parts)
            })
            .collect();

        let total = assembled.len();
        let mut survivors: Vec<NameCandidate> = if total > 1 {
            assembled.iter().filter(|c| !c.gender_conflict).cloned().collect()
        } else {
            assembled.clone()
        };
        if survivors.is_empty() {
            // Never drop the last remaining candidate.
            if let Some(first) = assembled.into_iter().next() {
                tracing::debug!(name = %first.name, "all candidates disagree on gender, keeping first");
                survivors.push(first);
            }
        }

        let mut seen = HashSet::new();
        survivors.retain(|c| seen.insert(c.name.clone()));

        if survivors.len() > self.config.max_candidates {
            tracing::warn!(
                input = name,
                produced = survivors.len(),
                max = self.config.max_candidates,
                "truncating nominative candidates"
            );
            survivors.truncate(self.config.max_candidates);
        }

        tracing::debug!(input = name, candidates = survivors.len(), "resolved nominative");
        Ok(survivors)
    }

    /// Nominative readings for one token, never empty.
    fn readings(&self, token: &NameToken) -> NafnResult<Vec<Reading>> {
        let entries = self.lexicon.lookup_lemmas(&token.title)?;

        let mut readings: Vec<Reading> = Vec::new();
        for entry in entries
            .iter()
            .filter(|e| self.config.accepts_domain(&e.domain))
        {
            let gender = entry.gender();
            match readings.iter_mut().find(|r| r.text == entry.lemma) {
                Some(existing) if existing.gender != gender => existing.gender = Gender::Unknown,
                Some(_) => {}
                None => readings.push(Reading {
                    text: entry.lemma.clone(),
                    gender,
                    source: ReadingSource::Lexicon,
                }),
            }
        }

        if readings.is_empty() {
            let (text, gender) = nominative_from_suffix(&token.title);
            let source = if gender.is_known() {
                ReadingSource::Suffix
            } else {
                ReadingSource::Echo
            };
            readings.push(Reading { text, gender, source });
        }

        tracing::trace!(
            token = %token.raw,
            readings = ?readings.iter().map(|r| (&r.text, r.source)).collect::<Vec<_>>(),
            "token readings"
        );
        Ok(readings)
    }
}

fn assemble(parts: &[&Reading]) -> NameCandidate {
    let mut gender = Gender::Unknown;
    let mut gender_conflict = false;
    for part in parts.iter().filter(|p| p.gender.is_known()) {
        if gender == Gender::Unknown {
            gender = part.gender;
        } else if gender != part.gender {
            gender_conflict = true;
        }
    }

    NameCandidate {
        name: parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        gender,
        gender_conflict,
    }
}
