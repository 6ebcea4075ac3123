//! In-memory contact directory.
//!
//! Evaluates query terms with the same start-anchored semantics a remote
//! knowledge base would apply. Compiled patterns are cached.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Read;
use std::sync::{OnceLock, RwLock};

use serde::Deserialize;

use crate::query::{CompiledQuery, QueryTerms};

use super::traits::{ContactDirectory, ContactDirectoryEntry, DirectoryError, OfficeContact};

const QUERY_CACHE_MAX: usize = 256;

static QUERY_CACHE: OnceLock<RwLock<HashMap<QueryTerms, CompiledQuery>>> = OnceLock::new();

fn lock_err(context: &'static str) -> DirectoryError {
    DirectoryError::Backend(format!("poisoned lock: {context}"))
}

fn cached_query(terms: &QueryTerms) -> Result<Option<CompiledQuery>, DirectoryError> {
    let cache = QUERY_CACHE.get_or_init(|| RwLock::new(HashMap::new()));

    {
        let guard = cache.read().map_err(|_| lock_err("directory.query_cache"))?;
        if let Some(query) = guard.get(terms) {
            return Ok(Some(query.clone()));
        }
    }

    let Some(compiled) = terms
        .compile()
        .map_err(|e| DirectoryError::InvalidQuery(e.to_string()))?
    else {
        return Ok(None);
    };

    let mut guard = cache.write().map_err(|_| lock_err("directory.query_cache"))?;
    if guard.len() >= QUERY_CACHE_MAX {
        guard.clear();
    }
    guard
        .entry(terms.clone())
        .or_insert_with(|| compiled.clone());
    Ok(Some(compiled))
}

/// JSON roster: either a bare array of staff, or an object with the
/// office details alongside the staff.
#[derive(Deserialize)]
#[serde(untagged)]
enum Roster {
    WithOffice {
        #[serde(default)]
        office: Option<OfficeContact>,
        staff: Vec<ContactDirectoryEntry>,
    },
    Staff(Vec<ContactDirectoryEntry>),
}

/// In-memory [`ContactDirectory`], keyed by full name.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    entries: RwLock<BTreeMap<String, ContactDirectoryEntry>>,
    office: RwLock<Option<OfficeContact>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from records.
    ///
    /// # Errors
    /// Returns [`DirectoryError::DuplicateName`] if two records share a name.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ContactDirectoryEntry>,
    ) -> Result<Self, DirectoryError> {
        let directory = Self::new();
        for entry in entries {
            directory.insert(entry)?;
        }
        Ok(directory)
    }

    /// Loads a JSON roster: an array of records, or
    /// `{"office": {...}, "staff": [...]}`.
    ///
    /// # Errors
    /// Fails on malformed JSON or duplicate names.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, DirectoryError> {
        let roster: Roster = serde_json::from_reader(reader)
            .map_err(|e| DirectoryError::Serialization(e.to_string()))?;
        let (office, staff) = match roster {
            Roster::WithOffice { office, staff } => (office, staff),
            Roster::Staff(staff) => (None, staff),
        };
        tracing::debug!(entries = staff.len(), office = office.is_some(), "loaded contact roster");
        let directory = Self::from_entries(staff)?;
        if let Some(office) = office {
            directory.set_office_contact(office)?;
        }
        Ok(directory)
    }

    /// Sets the main office details.
    ///
    /// # Errors
    /// Fails only if the internal lock is poisoned.
    pub fn set_office_contact(&self, office: OfficeContact) -> Result<(), DirectoryError> {
        let mut slot = self.office.write().map_err(|_| lock_err("directory.set_office_contact"))?;
        *slot = Some(office);
        Ok(())
    }

    /// Adds a record.
    ///
    /// # Errors
    /// Returns [`DirectoryError::DuplicateName`] if the name is taken.
    pub fn insert(&self, entry: ContactDirectoryEntry) -> Result<(), DirectoryError> {
        let mut entries = self.entries.write().map_err(|_| lock_err("directory.insert"))?;
        if entries.contains_key(&entry.name) {
            return Err(DirectoryError::DuplicateName(entry.name));
        }
        entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Removes and returns the record with this name.
    ///
    /// # Errors
    /// Fails only if the internal lock is poisoned.
    pub fn remove(&self, name: &str) -> Result<Option<ContactDirectoryEntry>, DirectoryError> {
        let mut entries = self.entries.write().map_err(|_| lock_err("directory.remove"))?;
        Ok(entries.remove(name))
    }

    fn filtered(
        &self,
        context: &'static str,
        mut keep: impl FnMut(&ContactDirectoryEntry) -> bool,
    ) -> Result<Vec<ContactDirectoryEntry>, DirectoryError> {
        let entries = self.entries.read().map_err(|_| lock_err(context))?;
        Ok(entries.values().filter(|e| keep(e)).cloned().collect())
    }
}

impl ContactDirectory for InMemoryDirectory {
    fn list_all_names(&self) -> Result<Vec<String>, DirectoryError> {
        let entries = self.entries.read().map_err(|_| lock_err("directory.list_all_names"))?;
        Ok(entries.keys().cloned().collect())
    }

    fn get(&self, name: &str) -> Result<Option<ContactDirectoryEntry>, DirectoryError> {
        let entries = self.entries.read().map_err(|_| lock_err("directory.get"))?;
        Ok(entries.get(name).cloned())
    }

    fn find_by_query_terms(
        &self,
        terms: &QueryTerms,
    ) -> Result<Vec<ContactDirectoryEntry>, DirectoryError> {
        let Some(query) = cached_query(terms)? else {
            return Ok(Vec::new());
        };
        self.filtered("directory.find_by_query_terms", |e| {
            e.family()
                .is_some_and(|family| query.is_match(&e.given_names(), &family))
        })
    }

    fn find_by_title(&self, title: &str) -> Result<Vec<ContactDirectoryEntry>, DirectoryError> {
        let needle = title.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        self.filtered("directory.find_by_title", |e| {
            e.title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&needle))
        })
    }

    fn find_by_role(&self, role: &str) -> Result<Vec<ContactDirectoryEntry>, DirectoryError> {
        self.filtered("directory.find_by_role", |e| e.role.as_deref() == Some(role))
    }

    fn list_roles(&self) -> Result<Vec<String>, DirectoryError> {
        let entries = self.entries.read().map_err(|_| lock_err("directory.list_roles"))?;
        let roles: BTreeSet<String> = entries.values().filter_map(|e| e.role.clone()).collect();
        Ok(roles.into_iter().collect())
    }

    fn office_contact(&self) -> Result<Option<OfficeContact>, DirectoryError> {
        let office = self.office.read().map_err(|_| lock_err("directory.office_contact"))?;
        Ok(office.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::extract_query_terms;

    fn roster() -> InMemoryDirectory {
        InMemoryDirectory::from_entries([
            ContactDirectoryEntry::new("Anna Jóna Árnadóttir").with_email("anna.jona@andabaer.is"),
            ContactDirectoryEntry::new("Lilja Lind Sturlaugsdóttir"),
            ContactDirectoryEntry::new("Jón Sigurðsson").with_title("Bæjarstjóri"),
            ContactDirectoryEntry::new("Ingibjörg Stefánsdóttir").with_title("Aðalgjaldkeri"),
            ContactDirectoryEntry::new("María Jóhannsdóttir").with_role("Velferðarmál"),
            ContactDirectoryEntry::new("Ásdís Guðmundsdóttir").with_role("Launamál"),
        ])
        .unwrap()
    }

    fn names(entries: &[ContactDirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn list_and_get() {
        let dir = roster();
        assert_eq!(dir.list_all_names().unwrap().len(), 6);
        assert!(dir.get("Jón Sigurðsson").unwrap().is_some());
        assert!(dir.get("Jón").unwrap().is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let dir = roster();
        let err = dir.insert(ContactDirectoryEntry::new("Jón Sigurðsson")).unwrap_err();
        assert!(matches!(err, DirectoryError::DuplicateName(_)));
    }

    #[test]
    fn remove_returns_entry() {
        let dir = roster();
        assert!(dir.remove("Jón Sigurðsson").unwrap().is_some());
        assert!(dir.remove("Jón Sigurðsson").unwrap().is_none());
    }

    #[test]
    fn query_terms_find_missing_middle_name() {
        let dir = roster();
        let found = dir.find_by_query_terms(&extract_query_terms("Anna Árnadóttir")).unwrap();
        assert_eq!(names(&found), ["Anna Jóna Árnadóttir"]);
    }

    #[test]
    fn query_terms_find_abbreviations() {
        let dir = roster();
        for query in ["Anna J. Árnadóttir", "Anna J Árnad"] {
            let found = dir.find_by_query_terms(&extract_query_terms(query)).unwrap();
            assert_eq!(names(&found), ["Anna Jóna Árnadóttir"], "{query}");
        }
        for query in ["Lilja L. Sturlaugsdóttir", "Lilja L.", "Lilja Lind Sturlaugsd."] {
            let found = dir.find_by_query_terms(&extract_query_terms(query)).unwrap();
            assert_eq!(names(&found), ["Lilja Lind Sturlaugsdóttir"], "{query}");
        }
    }

    #[test]
    fn unsearchable_terms_find_nothing() {
        let dir = roster();
        assert!(dir.find_by_query_terms(&extract_query_terms("Guðm")).unwrap().is_empty());
    }

    #[test]
    fn title_search_is_case_insensitive_substring() {
        let dir = roster();
        assert_eq!(names(&dir.find_by_title("bæjarstjóri").unwrap()), ["Jón Sigurðsson"]);
        assert_eq!(names(&dir.find_by_title("gjaldkeri").unwrap()), ["Ingibjörg Stefánsdóttir"]);
        assert!(dir.find_by_title("ruslakarl").unwrap().is_empty());
        assert!(dir.find_by_title(" ").unwrap().is_empty());
    }

    #[test]
    fn role_search_is_exact() {
        let dir = roster();
        assert_eq!(names(&dir.find_by_role("Velferðarmál").unwrap()), ["María Jóhannsdóttir"]);
        assert!(dir.find_by_role("velferðarmál").unwrap().is_empty());
        assert_eq!(dir.list_roles().unwrap(), ["Launamál", "Velferðarmál"]);
    }

    #[test]
    fn json_roster_loads() {
        let json = r#"[
            {"name": "Hildur Hallsdóttir", "email": "hildur@andabaer.is", "phone": "499 1001"},
            {"name": "Guðbjörg Helgadóttir", "title": "Matráður"}
        ]"#;
        let dir = InMemoryDirectory::from_json_reader(json.as_bytes()).unwrap();
        let hildur = dir.get("Hildur Hallsdóttir").unwrap().unwrap();
        assert_eq!(hildur.phone.as_deref(), Some("499 1001"));
        assert_eq!(hildur.title, None);
    }

    #[test]
    fn json_roster_with_office_loads() {
        let json = r#"{
            "office": {"phone": "433 1000", "email": "skrifstofa@andabaer.is"},
            "staff": [{"name": "Hildur Hallsdóttir"}]
        }"#;
        let dir = InMemoryDirectory::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(
            dir.office_contact().unwrap(),
            Some(OfficeContact::new("433 1000").with_email("skrifstofa@andabaer.is"))
        );
        assert_eq!(dir.list_all_names().unwrap(), ["Hildur Hallsdóttir"]);
    }

    #[test]
    fn office_contact_is_optional() {
        let dir = roster();
        assert_eq!(dir.office_contact().unwrap(), None);
        dir.set_office_contact(OfficeContact::new("433 1000")).unwrap();
        assert_eq!(dir.office_contact().unwrap().map(|o| o.phone).as_deref(), Some("433 1000"));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = InMemoryDirectory::from_json_reader("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, DirectoryError::Serialization(_)));
    }
}
