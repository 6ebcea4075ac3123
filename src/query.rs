//! Query terms for abbreviated or partial names.
//!
//! When whole-token matching fails, the input may be missing a middle name
//! ("Anna Árnadóttir" for "Anna Jóna Árnadóttir") or abbreviate one
//! ("Lilja L. Sturlaugsdóttir", "Anna J Árnad"). [`extract_query_terms`]
//! turns such input into a pair of start-anchored patterns, one for the
//! given names and one for the family name, for the directory to evaluate.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static ABBREVIATED_INITIAL: OnceLock<Regex> = OnceLock::new();

fn abbreviated_initial() -> &'static Regex {
    ABBREVIATED_INITIAL
        .get_or_init(|| Regex::new(r"^[A-ZÁÉÍÓÚÝÞÆÖ]\.?$").expect("static initial pattern is valid"))
}

/// Pattern for the family-name part of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "pattern", rename_all = "snake_case")]
pub enum FamilyNamePattern {
    /// Any family name.
    Any,
    /// Family name starting with this (regex-escaped) text.
    Prefix(String),
    /// The input cannot produce a valid query; matches nothing.
    NoValidMatch,
}

/// First-name and family-name patterns extracted from a contact string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryTerms {
    first_name: String,
    family_name: FamilyNamePattern,
}

impl QueryTerms {
    /// Pattern the given names must start with.
    #[must_use]
    pub fn first_name_pattern(&self) -> &str {
        &self.first_name
    }

    /// Pattern the family name must start with, or `None` when the terms
    /// cannot match anything.
    #[must_use]
    pub fn family_name_pattern(&self) -> Option<&str> {
        match &self.family_name {
            FamilyNamePattern::Any => Some(".*"),
            FamilyNamePattern::Prefix(p) => Some(p),
            FamilyNamePattern::NoValidMatch => None,
        }
    }

    /// The family-name pattern variant.
    #[must_use]
    pub fn family_name(&self) -> &FamilyNamePattern {
        &self.family_name
    }

    /// Returns false when these terms contribute no matches.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.family_name != FamilyNamePattern::NoValidMatch
    }

    /// Compiles both patterns, anchored at the start.
    ///
    /// Returns `Ok(None)` for terms that are not searchable.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidQueryPattern`] if a pattern does not
    /// compile.
    pub fn compile(&self) -> Result<Option<CompiledQuery>, ValidationError> {
        let Some(family) = self.family_name_pattern() else {
            return Ok(None);
        };
        Ok(Some(CompiledQuery {
            first_name: anchored(&self.first_name)?,
            family_name: anchored(family)?,
        }))
    }
}

fn anchored(pattern: &str) -> Result<Regex, ValidationError> {
    Regex::new(&format!("^{pattern}")).map_err(|e| ValidationError::InvalidQueryPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Compiled form of [`QueryTerms`].
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    first_name: Regex,
    family_name: Regex,
}

impl CompiledQuery {
    /// Tests a directory record's given names and family name.
    #[must_use]
    pub fn is_match(&self, given_names: &str, family_name: &str) -> bool {
        self.first_name.is_match(given_names) && self.family_name.is_match(family_name)
    }
}

/// Extracts query terms from `contact`.
///
/// - A single token gives no valid family pattern.
/// - A one-letter second token (with or without a dot) is an abbreviated
///   middle name: the bare letter joins the first-name pattern and a third
///   token, if any, is the family name.
/// - Otherwise the first name must be followed by a space or the end, and
///   the last token is the family name.
///
/// A trailing dot on the family name is dropped.
///
/// ```
/// use nafnaleit::query::extract_query_terms;
///
/// let terms = extract_query_terms("Lilja L. Sturlaugsdóttir");
/// assert_eq!(terms.first_name_pattern(), "Lilja L");
/// assert_eq!(terms.family_name_pattern(), Some("Sturlaugsdóttir"));
/// ```
#[must_use]
pub fn extract_query_terms(contact: &str) -> QueryTerms {
    let tokens: Vec<&str> = contact.split_whitespace().collect();
    let Some((&first, rest)) = tokens.split_first() else {
        return QueryTerms {
            first_name: String::new(),
            family_name: FamilyNamePattern::NoValidMatch,
        };
    };
    let first = regex::escape(first);

    let (first_name, family) = match rest {
        [] => (first, None),
        [middle, tail @ ..] if abbreviated_initial().is_match(middle) => {
            let initial: String = middle.chars().take(1).collect();
            // Only a single trailing token counts as the family name.
            let family = match tail {
                [family] => Some(*family),
                _ => None,
            };
            return build(
                format!("{first} {initial}"),
                family.map_or(FamilyNamePattern::Any, prefix),
            );
        }
        [.., last] => (format!("{first}( |$)"), Some(*last)),
    };

    match family {
        None => QueryTerms {
            first_name,
            family_name: FamilyNamePattern::NoValidMatch,
        },
        Some(family) => build(first_name, prefix(family)),
    }
}

fn prefix(family: &str) -> FamilyNamePattern {
    let family = family.strip_suffix('.').unwrap_or(family);
    FamilyNamePattern::Prefix(regex::escape(family))
}

fn build(first_name: String, family_name: FamilyNamePattern) -> QueryTerms {
    QueryTerms {
        first_name,
        family_name,
    }
}
