//! Whole-token contact matching.
//!
//! A candidate matches a directory name when the candidate, or one of its
//! tokens, equals a whole token of that name, or when it equals the whole
//! name. "Anna" and "Anna Jóna" both match "Anna Jóna Árnadóttir"; "Anna"
//! does not match "Annasdóttir". Comparison ignores case.
//!
//! [`MatchRule::ContiguousRun`] is a stricter rule for callers that must not
//! let a shared given name match a different full name.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Outcome of probing a directory with a set of candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "names", rename_all = "snake_case")]
pub enum MatchResult {
    /// Nothing matched.
    NoMatch,
    /// Exactly one directory name matched.
    UniqueMatch(String),
    /// Several names matched; the caller disambiguates.
    Ambiguous(BTreeSet<String>),
}

impl MatchResult {
    /// Classifies a set of matched names.
    #[must_use]
    pub fn from_names(mut names: BTreeSet<String>) -> Self {
        match names.len() {
            0 => Self::NoMatch,
            1 => names
                .pop_first()
                .map_or(Self::NoMatch, Self::UniqueMatch),
            _ => Self::Ambiguous(names),
        }
    }

    /// Returns true unless this is [`MatchResult::NoMatch`].
    #[must_use]
    pub const fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }

    /// Returns true for [`MatchResult::Ambiguous`].
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    /// Number of matched names.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::NoMatch => 0,
            Self::UniqueMatch(_) => 1,
            Self::Ambiguous(names) => names.len(),
        }
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Matched names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::NoMatch => Vec::new(),
            Self::UniqueMatch(name) => vec![name.as_str()],
            Self::Ambiguous(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Unions two results.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let mut names = self.into_names();
        names.extend(other.into_names());
        Self::from_names(names)
    }

    fn into_names(self) -> BTreeSet<String> {
        match self {
            Self::NoMatch => BTreeSet::new(),
            Self::UniqueMatch(name) => BTreeSet::from([name]),
            Self::Ambiguous(names) => names,
        }
    }
}

/// How a candidate is compared with a directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Any candidate token equals a whole token of the name, or the
    /// candidate equals the whole name.
    #[default]
    AnyToken,
    /// The candidate's tokens appear as a contiguous run of the name's
    /// tokens.
    ContiguousRun,
}

impl MatchRule {
    /// Returns true if `candidate` matches `entry` under this rule.
    #[must_use]
    pub fn matches(self, candidate: &str, entry: &str) -> bool {
        let needle = folded_tokens(candidate);
        if needle.is_empty() {
            return false;
        }
        let haystack = folded_tokens(entry);
        match self {
            // A candidate equal to the whole name shares all of its tokens.
            Self::AnyToken => needle.iter().any(|t| haystack.contains(t)),
            Self::ContiguousRun => haystack.windows(needle.len()).any(|w| w == needle.as_slice()),
        }
    }
}

fn folded_tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_lowercase).collect()
}

/// Returns true if `candidate` matches `entry` on whole tokens
/// ([`MatchRule::AnyToken`]).
///
/// ```
/// use nafnaleit::matcher::whole_token_match;
///
/// assert!(whole_token_match("Jóna", "Anna Jóna Árnadóttir"));
/// assert!(whole_token_match("Anna Árnadóttir", "Anna Jóna Árnadóttir"));
/// assert!(!whole_token_match("Ann", "Anna Jóna Árnadóttir"));
/// ```
#[must_use]
pub fn whole_token_match(candidate: &str, entry: &str) -> bool {
    MatchRule::AnyToken.matches(candidate, entry)
}

/// Matches every candidate against every directory name with
/// [`MatchRule::AnyToken`].
///
/// ```
/// use nafnaleit::matcher::{match_candidates, MatchResult};
///
/// let directory = ["Anna Jóna Árnadóttir", "Jón Sigurðsson"];
/// assert_eq!(
///     match_candidates(&["Anna"], &directory),
///     MatchResult::UniqueMatch("Anna Jóna Árnadóttir".to_string()),
/// );
/// ```
#[must_use]
pub fn match_candidates<C, D>(candidates: &[C], directory: &[D]) -> MatchResult
where
    C: AsRef<str>,
    D: AsRef<str>,
{
    match_candidates_with(MatchRule::AnyToken, candidates, directory)
}

/// Matches every candidate against every directory name under `rule`.
#[must_use]
pub fn match_candidates_with<C, D>(rule: MatchRule, candidates: &[C], directory: &[D]) -> MatchResult
where
    C: AsRef<str>,
    D: AsRef<str>,
{
    let mut matched = BTreeSet::new();
    for candidate in candidates {
        for entry in directory {
            if rule.matches(candidate.as_ref(), entry.as_ref()) {
                matched.insert(entry.as_ref().to_string());
            }
        }
    }
    let result = MatchResult::from_names(matched);
    tracing::debug!(
        ?rule,
        candidates = candidates.len(),
        directory = directory.len(),
        matched = result.len(),
        "matched candidates"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTORY: [&str; 5] = [
        "Anna Jóna Árnadóttir",
        "Jón Sigurðsson",
        "Jón Annasson",
        "Hildur Hallsdóttir",
        "María Jóhannsdóttir",
    ];

    #[test]
    fn first_name_matches_uniquely() {
        assert_eq!(
            match_candidates(&["Anna"], &DIRECTORY),
            MatchResult::UniqueMatch("Anna Jóna Árnadóttir".to_string())
        );
    }

    #[test]
    fn shared_first_name_is_ambiguous() {
        let result = match_candidates(&["Jón"], &DIRECTORY);
        assert!(result.is_ambiguous());
        assert_eq!(result.names(), ["Jón Annasson", "Jón Sigurðsson"]);
    }

    #[test]
    fn substring_is_not_a_match() {
        assert!(!whole_token_match("Anna", "Jón Annasson"));
        assert!(!whole_token_match("Jóh", "María Jóhannsdóttir"));
    }

    #[test]
    fn any_candidate_token_matches() {
        assert!(whole_token_match("Anna Jóna", "Anna Jóna Árnadóttir"));
        assert!(whole_token_match("Anna Jóna Árnadóttir", "Anna Jóna Árnadóttir"));
        assert!(whole_token_match("Anna Árnadóttir", "Anna Jóna Árnadóttir"));
        assert_eq!(
            match_candidates(&["Jón Jónsson"], &["Jón Sigurðsson", "Anna Jóna Árnadóttir"]),
            MatchResult::UniqueMatch("Jón Sigurðsson".to_string())
        );
        assert_eq!(match_candidates(&["Guðm Jónsson"], &DIRECTORY), MatchResult::NoMatch);
    }

    #[test]
    fn contiguous_run_is_stricter() {
        let rule = MatchRule::ContiguousRun;
        assert!(rule.matches("Anna Jóna", "Anna Jóna Árnadóttir"));
        assert!(rule.matches("Jóna Árnadóttir", "Anna Jóna Árnadóttir"));
        assert!(!rule.matches("Anna Árnadóttir", "Anna Jóna Árnadóttir"));
        assert!(!rule.matches("Anna", "Jón Annasson"));
        assert_eq!(
            match_candidates_with(rule, &["Jón Jónsson"], &DIRECTORY),
            MatchResult::NoMatch
        );
        assert_eq!(
            match_candidates_with(rule, &["Jón Sigurðsson"], &DIRECTORY),
            MatchResult::UniqueMatch("Jón Sigurðsson".to_string())
        );
    }

    #[test]
    fn rule_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MatchRule::ContiguousRun).unwrap(), "\"contiguous_run\"");
        assert_eq!(MatchRule::default(), MatchRule::AnyToken);
    }

    #[test]
    fn comparison_ignores_case() {
        assert!(whole_token_match("hildur", "Hildur Hallsdóttir"));
        assert!(whole_token_match("MARÍA", "María Jóhannsdóttir"));
    }

    #[test]
    fn blank_candidate_matches_nothing() {
        assert!(!whole_token_match("", "Hildur Hallsdóttir"));
        assert_eq!(match_candidates(&["  "], &DIRECTORY), MatchResult::NoMatch);
    }

    #[test]
    fn matches_across_candidates_are_deduplicated() {
        let result = match_candidates(&["Björn Jónsson", "Birnir Jónsson", "Hildur", "Hallsdóttir"], &DIRECTORY);
        assert_eq!(result, MatchResult::UniqueMatch("Hildur Hallsdóttir".to_string()));
    }

    #[test]
    fn empty_directory_is_no_match() {
        let empty: [&str; 0] = [];
        assert_eq!(match_candidates(&["Anna"], &empty), MatchResult::NoMatch);
    }

    #[test]
    fn merge_unions_results() {
        let a = MatchResult::UniqueMatch("Jón Sigurðsson".to_string());
        let b = MatchResult::UniqueMatch("Jón Annasson".to_string());
        assert_eq!(a.clone().merge(MatchResult::NoMatch), a);
        let merged = a.clone().merge(b);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.merge(a).len(), 2);
    }

    #[test]
    fn result_serializes_with_outcome_tag() {
        let json = serde_json::to_value(MatchResult::UniqueMatch("Jón Sigurðsson".to_string())).unwrap();
        assert_eq!(json["outcome"], "unique_match");
        assert_eq!(json["names"], "Jón Sigurðsson");
    }
}
