//! Phonebook operations
//!
//! Each operation is a single stateless request against the injected
//! store. Nothing here locks across store calls.

use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event};
use crate::person::{Person, PersonId, PersonInput, PersonUpdate};
use crate::store::{PersonFilter, PersonStore};

use super::errors::{PhonebookError, PhonebookResult};

/// CRUD handler over a [`PersonStore`]
pub struct Phonebook<S: PersonStore> {
    store: Arc<S>,
}

impl<S: PersonStore> Clone for Phonebook<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PersonStore> Phonebook<S> {
    pub fn new(store: S) -> Self {
        Self::with_shared_store(Arc::new(store))
    }

    pub fn with_shared_store(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All persons in store order
    pub async fn list(&self) -> PhonebookResult<Vec<Person>> {
        Ok(self.store.find_all().await?)
    }

    /// Number of persons, for the info page
    pub async fn count(&self) -> PhonebookResult<usize> {
        Ok(self.store.count().await?)
    }

    /// Person with the given id; `Ok(None)` when absent
    pub async fn get(&self, id: &str) -> PhonebookResult<Option<Person>> {
        let id = PersonId::parse(id)?;
        Ok(self.store.find_by_id(&id).await?)
    }

    /// Validate, check for duplicates and insert.
    ///
    /// The name and number lookups and the insert are separate store
    /// calls. Two concurrent creates with the same name can both pass the
    /// checks; only a uniqueness constraint inside the store would close
    /// that gap.
    pub async fn create(&self, input: PersonInput) -> PhonebookResult<Person> {
        let person = input.into_new_person().ok_or(PhonebookError::Validation)?;

        let same_name = self
            .store
            .find_one(&PersonFilter::Name(person.name.clone()))
            .await?;
        let same_number = self
            .store
            .find_one(&PersonFilter::Number(person.number.clone()))
            .await?;

        if same_name.is_some() {
            return Err(PhonebookError::DuplicateName);
        }
        if same_number.is_some() {
            return Err(PhonebookError::DuplicateNumber);
        }

        let saved = self.store.insert(person).await?;
        let id = saved.id.to_string();
        log_event_with_fields(
            Event::PersonCreated,
            &[("id", id.as_str()), ("name", saved.name.as_str())],
        );
        Ok(saved)
    }

    /// Overwrite the given fields of an existing person.
    ///
    /// Uniqueness of the new name or number is not re-checked.
    pub async fn update(&self, id: &str, input: PersonInput) -> PhonebookResult<Person> {
        let id = PersonId::parse(id)?;
        let updated = self
            .store
            .update_by_id(&id, PersonUpdate::from(input))
            .await?
            .ok_or(PhonebookError::NotFound)?;

        let id = updated.id.to_string();
        log_event_with_fields(
            Event::PersonUpdated,
            &[("id", id.as_str()), ("name", updated.name.as_str())],
        );
        Ok(updated)
    }

    /// Remove a person, returning the removed record
    pub async fn delete(&self, id: &str) -> PhonebookResult<Person> {
        let id = PersonId::parse(id)?;
        let deleted = self
            .store
            .delete_by_id(&id)
            .await?
            .ok_or(PhonebookError::NotFound)?;

        let id = deleted.id.to_string();
        log_event_with_fields(
            Event::PersonDeleted,
            &[
                ("id", id.as_str()),
                ("name", deleted.name.as_str()),
                ("number", deleted.number.as_str()),
            ],
        );
        Ok(deleted)
    }
}
