//! Lexical database access.
//!
//! The [`Lexicon`] trait is the read-only contract the resolver depends on;
//! [`InMemoryLexicon`] is the bundled backend, loadable from a BÍN export.

pub mod bin_csv;
mod memory;
mod traits;

pub use memory::InMemoryLexicon;
pub use traits::{LemmaId, LexicalEntry, Lexicon, LexiconError, WordForm};
