//! Reader for the BÍN "Sigrúnarsnið" export.
//!
//! Each line holds six semicolon-separated fields:
//!
//! ```text
//! lemma;id;category;domain;form;mark
//! Björn;356;kk;ism;Birni;ÞGFET
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;

use super::traits::{LemmaId, LexiconError, WordForm};

const FIELD_COUNT: usize = 6;

/// Parses one line. `line_no` is one-based and only used for errors.
///
/// # Errors
/// Returns [`LexiconError::Parse`] if the field count is wrong, the id is
/// not a number, or a required field is empty.
pub fn parse_line(line: &str, line_no: usize) -> Result<WordForm, LexiconError> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(LexiconError::Parse {
            line: line_no,
            reason: format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        });
    }

    let lemma_id: LemmaId = fields[1].parse().map_err(|e| LexiconError::Parse {
        line: line_no,
        reason: format!("invalid lemma id '{}': {e}", fields[1]),
    })?;

    for (idx, name) in [(0, "lemma"), (2, "category"), (4, "form"), (5, "mark")] {
        if fields[idx].is_empty() {
            return Err(LexiconError::Parse {
                line: line_no,
                reason: format!("empty {name}"),
            });
        }
    }

    Ok(WordForm::new(
        fields[0], lemma_id, fields[2], fields[3], fields[4], fields[5],
    ))
}

/// Reads every row from a BÍN export.
///
/// # Errors
/// Fails on the first malformed line or I/O error.
pub fn read_forms(reader: impl BufRead) -> Result<Vec<WordForm>, LexiconError> {
    let mut forms = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        forms.push(parse_line(trimmed, idx + 1)?);
    }
    Ok(forms)
}
