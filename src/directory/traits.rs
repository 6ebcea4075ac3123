//! Contact directory contract.
//!
//! The directory is an external roster of staff. Its own query capability
//! (prefix patterns, title search) lives behind this trait; the in-process
//! matcher only needs [`ContactDirectory::list_all_names`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::QueryTerms;

/// Errors that can occur during directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory could not be reached.
    #[error("Directory unavailable: {0}")]
    Unavailable(String),

    /// Backend error.
    #[error("Directory backend error: {0}")]
    Backend(String),

    /// A record with this full name already exists.
    #[error("Duplicate contact name: {0}")]
    DuplicateName(String),

    /// Query terms could not be evaluated.
    #[error("Invalid directory query: {0}")]
    InvalidQuery(String),

    /// Roster data could not be (de)serialized.
    #[error("Directory serialization error: {0}")]
    Serialization(String),
}

/// One person in the directory.
///
/// Absent attributes are `None`, never placeholder strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDirectoryEntry {
    /// Full canonical name, e.g. "Anna Jóna Árnadóttir".
    pub name: String,
    /// Given names; derived from `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name; derived from `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Direct phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Job title, e.g. "bæjarstjóri".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Subject area the person handles, e.g. "Velferðarmál".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl ContactDirectoryEntry {
    /// Creates an entry with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            first_name: None,
            family_name: None,
            phone: None,
            email: None,
            title: None,
            role: None,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the job title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Given names: the explicit field, or every token but the last.
    ///
    /// A single-token name is all given name.
    #[must_use]
    pub fn given_names(&self) -> String {
        if let Some(first) = &self.first_name {
            return first.clone();
        }
        let tokens: Vec<&str> = self.name.split_whitespace().collect();
        match tokens.split_last() {
            Some((_, given)) if !given.is_empty() => given.join(" "),
            _ => tokens.join(" "),
        }
    }

    /// Family name: the explicit field, or the last token of a
    /// multi-token name.
    #[must_use]
    pub fn family(&self) -> Option<String> {
        if let Some(family) = &self.family_name {
            return Some(family.clone());
        }
        let tokens: Vec<&str> = self.name.split_whitespace().collect();
        if tokens.len() > 1 {
            tokens.last().map(|t| (*t).to_string())
        } else {
            None
        }
    }

    /// Fills a missing phone number with the office number.
    #[must_use]
    pub fn with_office_phone(mut self, office: &OfficeContact) -> Self {
        if self.phone.is_none() {
            self.phone = Some(office.phone.clone());
        }
        self
    }
}

/// Main office contact details.
///
/// The office phone stands in for anyone without a direct number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeContact {
    /// Switchboard number.
    pub phone: String,
    /// General enquiries address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl OfficeContact {
    /// Creates office details with only a phone number.
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            email: None,
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Read access to the contact roster.
pub trait ContactDirectory: Send + Sync {
    /// Full names of everyone in the directory.
    fn list_all_names(&self) -> Result<Vec<String>, DirectoryError>;

    /// The record with exactly this full name.
    fn get(&self, name: &str) -> Result<Option<ContactDirectoryEntry>, DirectoryError>;

    /// Records whose given names and family name start with the query
    /// patterns. Unsearchable terms yield nothing.
    fn find_by_query_terms(
        &self,
        terms: &QueryTerms,
    ) -> Result<Vec<ContactDirectoryEntry>, DirectoryError>;

    /// Records whose title contains `title`, ignoring case.
    fn find_by_title(&self, title: &str) -> Result<Vec<ContactDirectoryEntry>, DirectoryError>;

    /// Records whose role equals `role`.
    fn find_by_role(&self, role: &str) -> Result<Vec<ContactDirectoryEntry>, DirectoryError>;

    /// Distinct roles present in the directory.
    fn list_roles(&self) -> Result<Vec<String>, DirectoryError>;

    /// Main office contact details, if the directory has them.
    fn office_contact(&self) -> Result<Option<OfficeContact>, DirectoryError>;
}
