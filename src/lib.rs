//! # nafnaleit - Icelandic name resolution and contact matching
//!
//! Icelandic personal names inflect for case: "Jón Sigurðsson" appears as
//! "Jóni Sigurðssyni" in the dative. This crate turns a name as it appears
//! in free text into its nominative (dictionary) forms and finds the
//! matching people in a contact directory.
//!
//! ## Core Concepts
//!
//! - **Lexicon**: a morphological dictionary mapping word forms to lemmas
//!   (the BÍN database in production)
//! - **Resolver**: produces nominative name candidates, labelled with gender
//! - **Matcher**: whole-token matching of candidates against directory names
//! - **Query terms**: start-anchored patterns for abbreviated or partial names
//! - **ContactFinder**: the staged lookup that combines all of the above
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use nafnaleit::{
//!     ContactDirectoryEntry, ContactFinder, InMemoryDirectory, InMemoryLexicon, MatchResult,
//!     Resolver, WordForm,
//! };
//!
//! let lexicon = InMemoryLexicon::from_forms([
//!     WordForm::new("Jón", 1, "kk", "ism", "Jón", "NFET"),
//!     WordForm::new("Jón", 1, "kk", "ism", "Jóni", "ÞGFET"),
//! ]);
//! let resolver = Resolver::new(Arc::new(lexicon));
//! assert_eq!(resolver.resolve_nominative("Jóni Sigurðssyni")?, ["Jón Sigurðsson"]);
//!
//! let directory = InMemoryDirectory::from_entries([
//!     ContactDirectoryEntry::new("Jón Sigurðsson"),
//!     ContactDirectoryEntry::new("Anna Jóna Árnadóttir"),
//! ])?;
//! let finder = ContactFinder::new(resolver, Arc::new(directory));
//! assert_eq!(
//!     finder.find("Jóni")?,
//!     MatchResult::UniqueMatch("Jón Sigurðsson".to_string()),
//! );
//! # Ok::<(), nafnaleit::NafnError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod error;
pub mod gender;
pub mod token;

// Morphology
pub mod declension;
pub mod lexicon;
pub mod resolver;
pub mod suffix;

// Matching and lookup
pub mod directory;
pub mod finder;
pub mod matcher;
pub mod query;

// Re-export primary types at crate root for convenience
pub use declension::Case;
pub use directory::{
    ContactDirectory, ContactDirectoryEntry, DirectoryError, InMemoryDirectory, OfficeContact,
};
pub use error::{NafnError, NafnResult, ValidationError};
pub use finder::{ContactFinder, FinderConfig};
pub use gender::Gender;
pub use lexicon::{InMemoryLexicon, LexicalEntry, Lexicon, LexiconError, WordForm};
pub use matcher::{match_candidates, match_candidates_with, MatchResult, MatchRule};
pub use query::{extract_query_terms, FamilyNamePattern, QueryTerms};
pub use resolver::{NameCandidate, Resolver, ResolverConfig};
