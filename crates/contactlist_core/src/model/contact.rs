//! Contact domain model.
//!
//! # Invariants
//! - `contact_id` is `None` until the row is inserted; the database assigns it.
//! - Once assigned, an id is never rewritten by this crate.
//! - Text fields are stored verbatim; this layer performs no validation.

use serde::{Deserialize, Serialize};

/// Database-generated contact identity.
pub type ContactId = i64;

/// One row of the `contacts` table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// `None` for contacts that were never persisted.
    pub contact_id: Option<ContactId>,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    /// Builds an unsaved contact.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        company: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            contact_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            company: company.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Returns a copy carrying the given persisted id.
    pub fn with_id(&self, contact_id: ContactId) -> Self {
        Self {
            contact_id: Some(contact_id),
            ..self.clone()
        }
    }

    /// Compares every field except `contact_id`.
    pub fn same_fields(&self, other: &Self) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.company == other.company
            && self.phone == other.phone
            && self.email == other.email
    }
}
