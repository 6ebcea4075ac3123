//! Declension of names into a target grammatical case.
//!
//! The inverse direction of the resolver: given a name (usually nominative)
//! produce the form a reply template needs, e.g. "Sævar" → "Sævari" for
//! "hjá Sævari".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NafnResult;
use crate::lexicon::Lexicon;
use crate::resolver::Resolver;
use crate::token::title_case;

/// Grammatical case and number, as BÍN inflection marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Case {
    /// Nominative singular.
    #[serde(rename = "NFET")]
    NominativeSingular,
    /// Accusative singular.
    #[serde(rename = "ÞFET")]
    AccusativeSingular,
    /// Dative singular.
    #[serde(rename = "ÞGFET")]
    DativeSingular,
    /// Genitive singular.
    #[serde(rename = "EFET")]
    GenitiveSingular,
    /// Nominative plural.
    #[serde(rename = "NFFT")]
    NominativePlural,
    /// Accusative plural.
    #[serde(rename = "ÞFFT")]
    AccusativePlural,
    /// Dative plural.
    #[serde(rename = "ÞGFFT")]
    DativePlural,
    /// Genitive plural.
    #[serde(rename = "EFFT")]
    GenitivePlural,
}

impl Case {
    /// The BÍN inflection mark for this case.
    #[must_use]
    pub const fn mark(self) -> &'static str {
        match self {
            Self::NominativeSingular => "NFET",
            Self::AccusativeSingular => "ÞFET",
            Self::DativeSingular => "ÞGFET",
            Self::GenitiveSingular => "EFET",
            Self::NominativePlural => "NFFT",
            Self::AccusativePlural => "ÞFFT",
            Self::DativePlural => "ÞGFFT",
            Self::GenitivePlural => "EFFT",
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mark())
    }
}

/// Returns `token` in `case`, or `token` unchanged if the lexicon has no
/// such form.
///
/// # Errors
/// Propagates lexicon failures.
pub fn declined_token(lexicon: &dyn Lexicon, token: &str, case: Case) -> NafnResult<String> {
    declined_token_in(lexicon, token, case, |_| true)
}

/// Like [`declined_token`], but only lemmas whose domain passes `accept`
/// are considered.
fn declined_token_in(
    lexicon: &dyn Lexicon,
    token: &str,
    case: Case,
    accept: impl Fn(&str) -> bool,
) -> NafnResult<String> {
    let hits = lexicon.lookup(&title_case(token))?;
    let Some(first) = hits.iter().find(|f| accept(&f.domain)) else {
        return Ok(token.to_string());
    };

    let form = lexicon
        .lookup_id(first.lemma_id)?
        .into_iter()
        .find(|f| f.mark == case.mark())
        .map_or_else(|| token.to_string(), |f| f.form);
    Ok(form)
}

/// Declines every token of `name` into `case`.
///
/// # Errors
/// Propagates lexicon failures.
pub fn declined_form(lexicon: &dyn Lexicon, name: &str, case: Case) -> NafnResult<String> {
    let mut parts = Vec::new();
    for token in name.split_whitespace() {
        parts.push(declined_token(lexicon, token, case)?);
    }
    Ok(parts.join(" "))
}

impl Resolver {
    /// Declines `name` into `case` using this resolver's lexicon.
    ///
    /// Only lemmas in the configured name domains are used.
    ///
    /// # Errors
    /// Propagates lexicon failures.
    pub fn declined_form(&self, name: &str, case: Case) -> NafnResult<String> {
        let config = self.config();
        let mut parts = Vec::new();
        for token in name.split_whitespace() {
            parts.push(declined_token_in(self.lexicon(), token, case, |domain| {
                config.accepts_domain(domain)
            })?);
        }
        Ok(parts.join(" "))
    }
}
