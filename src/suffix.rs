//! Patronymic/matronymic suffix heuristic.
//!
//! Most family names are not in the lexicon, but their case and gender can
//! be read off the `-son` / `-dóttir` ending. Only used when a lexicon lookup
//! returns nothing.

use crate::gender::Gender;

const DAUGHTER_NOMINATIVE: &str = "dóttir";
const DAUGHTER_OBLIQUE: &str = "dóttur";
const SON_NOMINATIVE: &str = "son";
const SON_DATIVE: &str = "syni";
const SON_GENITIVE: &str = "sonar";

/// Normalizes `word` to nominative from its suffix and infers gender.
///
/// Words without a recognized suffix are returned unchanged with
/// [`Gender::Unknown`].
///
/// ```
/// use nafnaleit::{suffix::nominative_from_suffix, Gender};
///
/// assert_eq!(nominative_from_suffix("Jónssyni"), ("Jónsson".to_string(), Gender::Male));
/// assert_eq!(nominative_from_suffix("Helgadóttur"), ("Helgadóttir".to_string(), Gender::Female));
/// ```
#[must_use]
pub fn nominative_from_suffix(word: &str) -> (String, Gender) {
    if let Some(stem) = word.strip_suffix(DAUGHTER_OBLIQUE) {
        return (format!("{stem}{DAUGHTER_NOMINATIVE}"), Gender::Female);
    }
    if word.ends_with(DAUGHTER_NOMINATIVE) {
        return (word.to_string(), Gender::Female);
    }
    if let Some(stem) = word
        .strip_suffix(SON_DATIVE)
        .or_else(|| word.strip_suffix(SON_GENITIVE))
    {
        return (format!("{stem}{SON_NOMINATIVE}"), Gender::Male);
    }
    if word.ends_with(SON_NOMINATIVE) {
        return (word.to_string(), Gender::Male);
    }
    (word.to_string(), Gender::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daughter_forms_normalize_to_dottir() {
        assert_eq!(
            nominative_from_suffix("Árnadóttur"),
            ("Árnadóttir".to_string(), Gender::Female)
        );
        assert_eq!(
            nominative_from_suffix("Árnadóttir"),
            ("Árnadóttir".to_string(), Gender::Female)
        );
    }

    #[test]
    fn son_forms_normalize_to_son() {
        for word in ["Adolfsson", "Adolfssyni", "Adolfssonar"] {
            assert_eq!(
                nominative_from_suffix(word),
                ("Adolfsson".to_string(), Gender::Male),
                "{word}"
            );
        }
    }

    #[test]
    fn only_the_suffix_is_rewritten() {
        // "syni" inside the stem stays untouched.
        assert_eq!(nominative_from_suffix("Synisson").0, "Synisson");
        assert_eq!(nominative_from_suffix("Dótturdóttur").0, "Dótturdóttir");
    }

    #[test]
    fn unknown_words_pass_through() {
        assert_eq!(
            nominative_from_suffix("Blúbbidís"),
            ("Blúbbidís".to_string(), Gender::Unknown)
        );
        assert_eq!(
            nominative_from_suffix("Sturlaugsd."),
            ("Sturlaugsd.".to_string(), Gender::Unknown)
        );
    }
}
