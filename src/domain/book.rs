//! The in-memory contact list and its persistence lifecycle.
//!
//! A [`ContactBook`] is opened once per session. Every mutating call
//! validates its input, applies the change in memory and saves the whole
//! list before returning. A failed save undoes the in-memory change, so the
//! book and its storage never disagree.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::contact::{Contact, ContactUpdate};
use super::search::{MatchPolicy, Matches};
use crate::errors::AppError;
use crate::storage::{ContactStore, CsvStorage};

/// Identifies one contact: by name (first match wins) or by 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Name(String),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub path: PathBuf,
    pub imported: usize,
    pub skipped: usize,
}

pub struct ContactBook {
    contacts: Vec<Contact>,
    storage: Box<dyn ContactStore>,
    policy: MatchPolicy,
}

impl ContactBook {
    /// Loads the list from `storage`. Absent storage yields an empty book;
    /// unreadable storage is returned as an error and nothing is written.
    pub fn open(storage: Box<dyn ContactStore>, policy: MatchPolicy) -> Result<Self, AppError> {
        let contacts = storage.load()?;
        info!(location = %storage.location(), count = contacts.len(), "contact book opened");

        Ok(Self {
            contacts,
            storage,
            policy,
        })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn location(&self) -> String {
        self.storage.location()
    }

    pub fn add(&mut self, contact: Contact) -> Result<&Contact, AppError> {
        contact.validate()?;

        self.contacts.push(contact);
        self.persist(|list| {
            list.pop();
        })?;

        let added = &self.contacts[self.contacts.len() - 1];
        debug!(name = %added.name, "contact added");
        Ok(added)
    }

    pub fn search(&self, query: &str) -> Result<Matches<'_>, AppError> {
        if query.trim().is_empty() {
            return Err(AppError::Validation("Search term required".to_string()));
        }
        Ok(Matches::new(&self.contacts, query, self.policy))
    }

    /// Index into `contacts()` of the selected contact.
    pub fn find(&self, selector: &Selector) -> Result<usize, AppError> {
        let found = match selector {
            Selector::Name(name) => self
                .contacts
                .iter()
                .position(|c| self.policy.same_name(&c.name, name)),
            Selector::Position(pos) => pos
                .checked_sub(1)
                .filter(|idx| *idx < self.contacts.len()),
        };

        found.ok_or_else(|| {
            debug!(?selector, "no contact for selector");
            AppError::NotFound(describe(selector))
        })
    }

    pub fn update(
        &mut self,
        selector: &Selector,
        update: ContactUpdate,
    ) -> Result<&Contact, AppError> {
        if update.is_empty() {
            return Err(AppError::Validation("Nothing to update".to_string()));
        }

        let idx = self.find(selector)?;
        let merged = update.merged_with(&self.contacts[idx])?;

        let previous = std::mem::replace(&mut self.contacts[idx], merged);
        self.persist(move |list| list[idx] = previous)?;

        debug!(name = %self.contacts[idx].name, "contact updated");
        Ok(&self.contacts[idx])
    }

    pub fn delete(&mut self, selector: &Selector) -> Result<Contact, AppError> {
        let idx = self.find(selector)?;

        let removed = self.contacts.remove(idx);
        let restore = removed.clone();
        self.persist(move |list| list.insert(idx, restore))?;

        debug!(name = %removed.name, "contact deleted");
        Ok(removed)
    }

    /// Appends every valid row of a CSV file. Rows that fail validation are
    /// skipped and counted.
    pub fn import_csv(&mut self, path: &Path) -> Result<ImportReport, AppError> {
        let source = CsvStorage::new(path)?;
        let rows = source.load()?;

        let before = self.contacts.len();
        let mut skipped = 0;
        for contact in rows {
            match Contact::new(&contact.name, &contact.phone, &contact.email, &contact.address) {
                Ok(contact) => self.contacts.push(contact),
                Err(e) => {
                    warn!(name = %contact.name, error = %e, "skipping csv row");
                    skipped += 1;
                }
            }
        }

        let imported = self.contacts.len() - before;
        if imported > 0 {
            self.persist(|list| list.truncate(before))?;
        }

        Ok(ImportReport {
            path: source.path,
            imported,
            skipped,
        })
    }

    pub fn export_csv(&self, path: &Path) -> Result<(PathBuf, usize), AppError> {
        let target = CsvStorage::new(path)?;
        target.save(&self.contacts)?;
        Ok((target.path, self.contacts.len()))
    }

    fn persist<F>(&mut self, rollback: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut Vec<Contact>),
    {
        if let Err(e) = self.storage.save(&self.contacts) {
            warn!(location = %self.storage.location(), error = %e, "save failed, change rolled back");
            rollback(&mut self.contacts);
            return Err(e);
        }
        Ok(())
    }
}

fn describe(selector: &Selector) -> String {
    match selector {
        Selector::Name(name) => format!("Contact '{}'", name.trim()),
        Selector::Position(pos) => format!("Contact #{}", pos),
    }
}
