//! Person store
//!
//! The document-store collaborator behind the phonebook. [`PersonStore`] is
//! the seam the HTTP layer is generic over; two backends implement it:
//!
//! - [`MemoryPersonStore`]: process-local, used by default and in tests
//! - [`FilePersonStore`]: append-only checksummed record file, rebuilt into
//!   memory on open
//!
//! Both keep records in insertion order, which is the order `find_all`
//! returns. Neither enforces name or number uniqueness.

mod errors;
mod file;
mod memory;

use async_trait::async_trait;

use crate::person::{NewPerson, Person, PersonId, PersonUpdate};

pub use errors::{StoreError, StoreResult};
pub use file::{FilePersonStore, PersonRecord, RecordReader, RecordWriter, STORE_FILE_NAME};
pub use memory::MemoryPersonStore;

/// Exact-match lookup filter for [`PersonStore::find_one`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonFilter {
    Name(String),
    Number(String),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            PersonFilter::Name(name) => person.name == *name,
            PersonFilter::Number(number) => person.number == *number,
        }
    }
}

/// Async document store over person records
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// All records in natural order
    async fn find_all(&self) -> StoreResult<Vec<Person>>;

    /// Record with the given id, if any
    async fn find_by_id(&self, id: &PersonId) -> StoreResult<Option<Person>>;

    /// First record matching the filter, if any
    async fn find_one(&self, filter: &PersonFilter) -> StoreResult<Option<Person>>;

    /// Store a new record under a freshly assigned id
    async fn insert(&self, person: NewPerson) -> StoreResult<Person>;

    /// Apply `update` to the record with the given id.
    ///
    /// Returns the record as it is after the update, or `None` if no
    /// record matched.
    async fn update_by_id(&self, id: &PersonId, update: PersonUpdate)
        -> StoreResult<Option<Person>>;

    /// Remove the record with the given id, returning it if it existed
    async fn delete_by_id(&self, id: &PersonId) -> StoreResult<Option<Person>>;

    /// Number of stored records
    async fn count(&self) -> StoreResult<usize>;
}
