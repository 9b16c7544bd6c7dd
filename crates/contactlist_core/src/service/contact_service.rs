//! Contact use-case service.
//!
//! # Responsibility
//! - Give callers (web controllers, the CLI) one entry point per contact use case.
//! - Emit metadata-only log events for writes. Contact field values are never logged.

use crate::model::contact::{Contact, ContactId};
use crate::model::search::SearchCriteria;
use crate::repo::contact_repo::ContactRepository;
use crate::repo::RepoResult;
use log::{debug, info, warn};

/// Use-case wrapper over a [`ContactRepository`].
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new contact and returns it with its generated id.
    pub fn add_contact(&self, contact: &Contact) -> RepoResult<Contact> {
        match self.repo.add_contact(contact) {
            Ok(created) => {
                info!(
                    "event=contact_add module=service status=ok contact_id={}",
                    created.contact_id.unwrap_or_default()
                );
                Ok(created)
            }
            Err(err) => {
                warn!("event=contact_add module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Full-row update; returns `ContactNotFound` when nothing matched.
    pub fn update_contact(&self, contact: &Contact) -> RepoResult<()> {
        let result = self.repo.update_contact(contact);
        match &result {
            Ok(()) => info!(
                "event=contact_update module=service status=ok contact_id={}",
                contact.contact_id.unwrap_or_default()
            ),
            Err(err) => warn!("event=contact_update module=service status=error error={err}"),
        }
        result
    }

    pub fn remove_contact(&self, contact_id: ContactId) -> RepoResult<()> {
        self.repo.remove_contact(contact_id)?;
        info!("event=contact_remove module=service status=ok contact_id={contact_id}");
        Ok(())
    }

    pub fn get_contact(&self, contact_id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(contact_id)
    }

    pub fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts()
    }

    /// Equality search; empty criteria behave like [`Self::list_contacts`].
    pub fn search_contacts(&self, criteria: &SearchCriteria) -> RepoResult<Vec<Contact>> {
        let found = self.repo.search_contacts(criteria)?;
        debug!(
            "event=contact_search module=service status=ok terms={} hits={}",
            criteria.len(),
            found.len()
        );
        Ok(found)
    }
}
