//! In-memory person store

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::person::{NewPerson, Person, PersonId, PersonUpdate};

use super::{PersonFilter, PersonStore, StoreError, StoreResult};

/// Insertion-ordered person collection shared by both store backends
#[derive(Debug, Default, Clone)]
pub(super) struct Persons {
    records: Vec<Person>,
}

impl Persons {
    pub(super) fn all(&self) -> Vec<Person> {
        self.records.clone()
    }

    pub(super) fn len(&self) -> usize {
        self.records.len()
    }

    pub(super) fn get(&self, id: &PersonId) -> Option<&Person> {
        self.records.iter().find(|p| p.id == *id)
    }

    pub(super) fn find(&self, filter: &PersonFilter) -> Option<&Person> {
        self.records.iter().find(|p| filter.matches(p))
    }

    /// Insert or replace in place; a replaced record keeps its position
    pub(super) fn put(&mut self, person: Person) {
        match self.records.iter_mut().find(|p| p.id == person.id) {
            Some(existing) => *existing = person,
            None => self.records.push(person),
        }
    }

    pub(super) fn remove(&mut self, id: &PersonId) -> Option<Person> {
        let index = self.records.iter().position(|p| p.id == *id)?;
        Some(self.records.remove(index))
    }
}

pub(super) fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Unavailable("Lock poisoned".to_string())
}

/// Process-local person store
#[derive(Debug, Default)]
pub struct MemoryPersonStore {
    persons: RwLock<Persons>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn find_all(&self) -> StoreResult<Vec<Person>> {
        Ok(self.persons.read().map_err(poisoned)?.all())
    }

    async fn find_by_id(&self, id: &PersonId) -> StoreResult<Option<Person>> {
        Ok(self.persons.read().map_err(poisoned)?.get(id).cloned())
    }

    async fn find_one(&self, filter: &PersonFilter) -> StoreResult<Option<Person>> {
        Ok(self.persons.read().map_err(poisoned)?.find(filter).cloned())
    }

    async fn insert(&self, person: NewPerson) -> StoreResult<Person> {
        let person = Person {
            id: PersonId::generate(),
            name: person.name,
            number: person.number,
        };
        self.persons.write().map_err(poisoned)?.put(person.clone());
        Ok(person)
    }

    async fn update_by_id(
        &self,
        id: &PersonId,
        update: PersonUpdate,
    ) -> StoreResult<Option<Person>> {
        let mut persons = self.persons.write().map_err(poisoned)?;
        let Some(mut person) = persons.get(id).cloned() else {
            return Ok(None);
        };
        update.apply_to(&mut person);
        persons.put(person.clone());
        Ok(Some(person))
    }

    async fn delete_by_id(&self, id: &PersonId) -> StoreResult<Option<Person>> {
        Ok(self.persons.write().map_err(poisoned)?.remove(id))
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.persons.read().map_err(poisoned)?.len())
    }
}
