//! Staged contact lookup.
//!
//! [`ContactFinder`] ties the resolver, the matcher and the directory
//! together. A lookup tries, in order: the raw input as written, the
//! nominative candidates of the input, and finally start-anchored query
//! terms for abbreviated or partial names. The first stage that matches
//! anything wins.
//!
//! Returned records never lack a phone number when the directory knows the
//! main office number.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::directory::{ContactDirectory, ContactDirectoryEntry, OfficeContact};
use crate::error::NafnResult;
use crate::matcher::{match_candidates_with, MatchResult, MatchRule};
use crate::query::extract_query_terms;
use crate::resolver::Resolver;
use crate::token::title_case_name;

/// Which lookup stages run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Match the title-cased input before resolving it.
    pub match_raw_input: bool,
    /// Fall back to directory query terms when whole-token matching fails.
    pub abbreviation_fallback: bool,
    /// Rule for the whole-token stages.
    pub match_rule: MatchRule,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            match_raw_input: true,
            abbreviation_fallback: true,
            match_rule: MatchRule::ContiguousRun,
        }
    }
}

/// Finds directory contacts from a possibly inflected, possibly abbreviated
/// name.
#[derive(Clone)]
pub struct ContactFinder {
    resolver: Resolver,
    directory: Arc<dyn ContactDirectory>,
    config: FinderConfig,
}

impl std::fmt::Debug for ContactFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactFinder")
            .field("resolver", &self.resolver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ContactFinder {
    /// Creates a finder with every stage enabled.
    #[must_use]
    pub fn new(resolver: Resolver, directory: Arc<dyn ContactDirectory>) -> Self {
        Self::with_config(resolver, directory, FinderConfig::default())
    }

    /// Creates a finder with explicit stage selection.
    #[must_use]
    pub fn with_config(
        resolver: Resolver,
        directory: Arc<dyn ContactDirectory>,
        config: FinderConfig,
    ) -> Self {
        Self {
            resolver,
            directory,
            config,
        }
    }

    /// Returns the resolver.
    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Returns the directory handle.
    #[must_use]
    pub fn directory(&self) -> &dyn ContactDirectory {
        self.directory.as_ref()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Looks up `raw` in the directory.
    ///
    /// Blank input is [`MatchResult::NoMatch`] and never reaches the
    /// directory.
    ///
    /// # Errors
    /// Propagates lexicon and directory failures.
    pub fn find(&self, raw: &str) -> NafnResult<MatchResult> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(MatchResult::NoMatch);
        }

        let names = self.directory.list_all_names()?;
        let titled = title_case_name(raw);

        if self.config.match_raw_input {
            let result = match_candidates_with(self.config.match_rule, &[titled.as_str()], &names);
            if result.is_match() {
                tracing::debug!(input = raw, stage = "raw", matched = result.len(), "contact found");
                return Ok(result);
            }
        }

        let candidates = self.resolver.resolve_nominative(raw)?;
        let result = match_candidates_with(self.config.match_rule, &candidates, &names);
        if result.is_match() {
            tracing::debug!(input = raw, stage = "nominative", matched = result.len(), "contact found");
            return Ok(result);
        }

        if !self.config.abbreviation_fallback {
            return Ok(MatchResult::NoMatch);
        }

        let mut inputs: Vec<&str> = vec![titled.as_str()];
        for candidate in &candidates {
            if !inputs.contains(&candidate.as_str()) {
                inputs.push(candidate);
            }
        }

        let mut matched = BTreeSet::new();
        for input in inputs {
            let terms = extract_query_terms(input);
            if !terms.is_searchable() {
                continue;
            }
            for entry in self.directory.find_by_query_terms(&terms)? {
                matched.insert(entry.name);
            }
        }

        let result = MatchResult::from_names(matched);
        tracing::debug!(input = raw, stage = "abbreviation", matched = result.len(), "contact lookup finished");
        Ok(result)
    }

    /// Like [`ContactFinder::find`], but returns the matched records.
    ///
    /// A record without a phone number gets the office number.
    ///
    /// # Errors
    /// Propagates lexicon and directory failures.
    pub fn find_entries(&self, raw: &str) -> NafnResult<Vec<ContactDirectoryEntry>> {
        let result = self.find(raw)?;
        let mut entries = Vec::with_capacity(result.len());
        for name in result.names() {
            if let Some(entry) = self.directory.get(name)? {
                entries.push(entry);
            }
        }
        self.with_office_phone(entries)
    }

    /// Records whose title contains `title`, with office phone fallback.
    ///
    /// # Errors
    /// Propagates directory failures.
    pub fn find_by_title(&self, title: &str) -> NafnResult<Vec<ContactDirectoryEntry>> {
        let entries = self.directory.find_by_title(title)?;
        self.with_office_phone(entries)
    }

    /// Records handling `role`, with office phone fallback.
    ///
    /// # Errors
    /// Propagates directory failures.
    pub fn find_by_role(&self, role: &str) -> NafnResult<Vec<ContactDirectoryEntry>> {
        let entries = self.directory.find_by_role(role)?;
        self.with_office_phone(entries)
    }

    fn with_office_phone(
        &self,
        entries: Vec<ContactDirectoryEntry>,
    ) -> NafnResult<Vec<ContactDirectoryEntry>> {
        if entries.iter().all(|e| e.phone.is_some()) {
            return Ok(entries);
        }
        let Some(office) = self.directory.office_contact()? else {
            return Ok(entries);
        };
        Ok(entries
            .into_iter()
            .map(|e| e.with_office_phone(&office))
            .collect())
    }

    /// Main office contact details.
    ///
    /// # Errors
    /// Propagates directory failures.
    pub fn office_contact(&self) -> NafnResult<Option<OfficeContact>> {
        Ok(self.directory.office_contact()?)
    }
}
