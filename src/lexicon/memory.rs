//! In-memory lexicon backend.
//!
//! Thread-safe, indexed by exact form and by lemma id. Intended for
//! embedded use, tests, and hosts that load a BÍN extract at startup.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::RwLock;

use super::bin_csv;
use super::traits::{LemmaId, Lexicon, LexiconError, WordForm};

fn lock_err(context: &'static str) -> LexiconError {
    LexiconError::Backend(format!("poisoned lock: {context}"))
}

#[derive(Debug, Default)]
struct LexiconState {
    rows: Vec<WordForm>,
    by_form: HashMap<String, Vec<usize>>,
    by_id: HashMap<LemmaId, Vec<usize>>,
}

impl LexiconState {
    fn push(&mut self, form: WordForm) {
        let rows = &self.rows;
        // Duplicates share a form, so only that form's rows need checking.
        let indexed = self.by_form.entry(form.form.clone()).or_default();
        if indexed.iter().any(|&i| rows[i] == form) {
            return;
        }
        let idx = rows.len();
        indexed.push(idx);
        self.by_id.entry(form.lemma_id).or_default().push(idx);
        self.rows.push(form);
    }

    fn collect(&self, indices: Option<&Vec<usize>>) -> Vec<WordForm> {
        indices
            .map(|ids| ids.iter().map(|&i| self.rows[i].clone()).collect())
            .unwrap_or_default()
    }
}

/// In-memory [`Lexicon`] implementation.
#[derive(Debug, Default)]
pub struct InMemoryLexicon {
    state: RwLock<LexiconState>,
}

impl InMemoryLexicon {
    /// Creates an empty lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a lexicon holding `forms`. Exact duplicate rows are ignored.
    #[must_use]
    pub fn from_forms(forms: impl IntoIterator<Item = WordForm>) -> Self {
        let mut state = LexiconState::default();
        for form in forms {
            state.push(form);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Loads a BÍN "Sigrúnarsnið" export.
    ///
    /// # Errors
    /// Fails on I/O errors or the first malformed line.
    pub fn from_bin_reader(reader: impl BufRead) -> Result<Self, LexiconError> {
        let forms = bin_csv::read_forms(reader)?;
        tracing::debug!(rows = forms.len(), "loaded BÍN extract");
        Ok(Self::from_forms(forms))
    }

    /// Opens and loads a BÍN export file.
    ///
    /// # Errors
    /// Returns [`LexiconError::Unavailable`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, LexiconError> {
        let file = File::open(path).map_err(|e| {
            LexiconError::Unavailable(format!("cannot open {}: {e}", path.display()))
        })?;
        Self::from_bin_reader(BufReader::new(file))
    }

    /// Adds a row.
    ///
    /// # Errors
    /// Fails only if the internal lock is poisoned.
    pub fn insert(&self, form: WordForm) -> Result<(), LexiconError> {
        let mut state = self.state.write().map_err(|_| lock_err("lexicon.insert"))?;
        state.push(form);
        Ok(())
    }

    /// Number of stored rows.
    ///
    /// # Errors
    /// Fails only if the internal lock is poisoned.
    pub fn len(&self) -> Result<usize, LexiconError> {
        let state = self.state.read().map_err(|_| lock_err("lexicon.len"))?;
        Ok(state.rows.len())
    }

    /// Returns true if no rows are stored.
    ///
    /// # Errors
    /// Fails only if the internal lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, LexiconError> {
        Ok(self.len()? == 0)
    }
}

impl Lexicon for InMemoryLexicon {
    fn lookup(&self, word: &str) -> Result<Vec<WordForm>, LexiconError> {
        let state = self.state.read().map_err(|_| lock_err("lexicon.lookup"))?;
        Ok(state.collect(state.by_form.get(word)))
    }

    fn lookup_id(&self, id: LemmaId) -> Result<Vec<WordForm>, LexiconError> {
        let state = self.state.read().map_err(|_| lock_err("lexicon.lookup_id"))?;
        Ok(state.collect(state.by_id.get(&id)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn bjorn_birnir() -> InMemoryLexicon {
        InMemoryLexicon::from_forms([
            WordForm::new("Björn", 1, "kk", "ism", "Björn", "NFET"),
            WordForm::new("Björn", 1, "kk", "ism", "Björn", "ÞFET"),
            WordForm::new("Björn", 1, "kk", "ism", "Birni", "ÞGFET"),
            WordForm::new("Björn", 1, "kk", "ism", "Bjarnar", "EFET"),
            WordForm::new("Birnir", 2, "kk", "ism", "Birnir", "NFET"),
            WordForm::new("Birnir", 2, "kk", "ism", "Birni", "ÞFET"),
            WordForm::new("Birnir", 2, "kk", "ism", "Birni", "ÞGFET"),
            WordForm::new("Birnir", 2, "kk", "ism", "Birnis", "EFET"),
        ])
    }

    #[test]
    fn lookup_is_exact_on_form() {
        let lex = bjorn_birnir();
        assert_eq!(lex.lookup("Birni").unwrap().len(), 3);
        assert!(lex.lookup("birni").unwrap().is_empty());
        assert!(lex.lookup("Jón").unwrap().is_empty());
    }

    #[test]
    fn lookup_lemmas_deduplicates_in_order() {
        let lex = bjorn_birnir();
        let lemmas = lex.lookup_lemmas("Birni").unwrap();
        let names: Vec<&str> = lemmas.iter().map(|e| e.lemma.as_str()).collect();
        assert_eq!(names, ["Björn", "Birnir"]);
        assert_eq!(lemmas[0].lemma_id, 1);
        assert_eq!(lemmas[1].gender(), crate::Gender::Male);
    }

    #[test]
    fn lookup_id_returns_all_forms() {
        let lex = bjorn_birnir();
        let forms = lex.lookup_id(1).unwrap();
        assert_eq!(forms.len(), 4);
        assert!(forms.iter().any(|f| f.mark == "EFET" && f.form == "Bjarnar"));
        assert!(lex.lookup_id(99).unwrap().is_empty());
    }

    #[test]
    fn insert_ignores_duplicates() {
        let lex = InMemoryLexicon::new();
        assert!(lex.is_empty().unwrap());
        let row = WordForm::new("Jón", 7, "kk", "ism", "Jóni", "ÞGFET");
        lex.insert(row.clone()).unwrap();
        lex.insert(row).unwrap();
        assert_eq!(lex.len().unwrap(), 1);
        assert_eq!(lex.lookup("Jóni").unwrap()[0].lemma, "Jón");
    }

    #[test]
    fn open_reads_bin_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Unnur;10;kvk;ism;Unnur;NFET").unwrap();
        writeln!(file, "Unnur;10;kvk;ism;Unnar;EFET").unwrap();
        file.flush().unwrap();

        let lex = InMemoryLexicon::open(file.path()).unwrap();
        assert_eq!(lex.len().unwrap(), 2);
        assert_eq!(lex.lookup_lemmas("Unnar").unwrap()[0].lemma, "Unnur");
    }

    #[test]
    fn large_extract_loads_and_deduplicates() {
        const LEMMAS: u32 = 25_000;
        const MARKS: [&str; 4] = ["NFET", "ÞFET", "ÞGFET", "EFET"];

        let mut extract = String::new();
        for id in 0..LEMMAS {
            for (n, mark) in MARKS.iter().enumerate() {
                extract.push_str(&format!("Nafn{id};{id};kk;ism;Nafn{id}x{n};{mark}\n"));
            }
        }
        // Second copy of the first lemma's rows.
        for (n, mark) in MARKS.iter().enumerate() {
            extract.push_str(&format!("Nafn0;0;kk;ism;Nafn0x{n};{mark}\n"));
        }

        let lex = InMemoryLexicon::from_bin_reader(extract.as_bytes()).unwrap();
        assert_eq!(lex.len().unwrap(), LEMMAS as usize * MARKS.len());
        assert_eq!(lex.lookup("Nafn0x2").unwrap().len(), 1);
        assert_eq!(lex.lookup_id(LEMMAS - 1).unwrap().len(), MARKS.len());
    }

    #[test]
    fn open_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = InMemoryLexicon::open(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, LexiconError::Unavailable(_)));
    }
}
