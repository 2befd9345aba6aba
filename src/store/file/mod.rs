//! File-backed person store
//!
//! An append-only record file with CRC32 checksums. Updates append a new
//! live record for the same id, deletes append a tombstone, and the latest
//! record for an id wins. The whole file is replayed into memory on open;
//! reads never touch disk afterwards.
//!
//! Opening a file with a corrupted or truncated record fails rather than
//! serving a partial phonebook.

mod checksum;
mod reader;
mod record;
mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::person::{NewPerson, Person, PersonId, PersonUpdate};

use super::memory::{poisoned, Persons};
use super::{PersonFilter, PersonStore, StoreResult};

pub use reader::RecordReader;
pub use record::PersonRecord;
pub use writer::RecordWriter;

/// File name of the person log inside the data directory
pub const STORE_FILE_NAME: &str = "persons.dat";

struct FileState {
    writer: RecordWriter,
    persons: Persons,
}

/// Person store persisted to `<data_dir>/persons.dat`
pub struct FilePersonStore {
    path: PathBuf,
    state: Mutex<FileState>,
}

impl FilePersonStore {
    /// Opens the store in `data_dir`, replaying any existing records
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let path = data_dir.join(STORE_FILE_NAME);
        let persons = Self::replay(&path)?;
        let writer = RecordWriter::open(&path)?;

        Ok(Self {
            path,
            state: Mutex::new(FileState { writer, persons }),
        })
    }

    /// Replays an existing store without opening it for writes.
    ///
    /// Unlike [`open`](Self::open), a missing person file is an error and
    /// nothing is created on disk.
    pub fn load(data_dir: &Path) -> StoreResult<Vec<Person>> {
        let reader = RecordReader::open(&data_dir.join(STORE_FILE_NAME))?;
        Ok(Self::replay_records(reader)?.all())
    }

    fn replay(path: &Path) -> StoreResult<Persons> {
        if !path.exists() {
            return Ok(Persons::default());
        }
        Self::replay_records(RecordReader::open(path)?)
    }

    fn replay_records(mut reader: RecordReader) -> StoreResult<Persons> {
        let mut persons = Persons::default();
        while let Some(record) = reader.read_next()? {
            if record.is_tombstone {
                persons.remove(&PersonId::parse(&record.person_id)?);
            } else {
                persons.put(record.to_person()?);
            }
        }
        Ok(persons)
    }

    /// Path of the underlying record file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PersonStore for FilePersonStore {
    async fn find_all(&self) -> StoreResult<Vec<Person>> {
        Ok(self.state.lock().map_err(poisoned)?.persons.all())
    }

    async fn find_by_id(&self, id: &PersonId) -> StoreResult<Option<Person>> {
        Ok(self.state.lock().map_err(poisoned)?.persons.get(id).cloned())
    }

    async fn find_one(&self, filter: &PersonFilter) -> StoreResult<Option<Person>> {
        Ok(self
            .state
            .lock()
            .map_err(poisoned)?
            .persons
            .find(filter)
            .cloned())
    }

    async fn insert(&self, person: NewPerson) -> StoreResult<Person> {
        let person = Person {
            id: PersonId::generate(),
            name: person.name,
            number: person.number,
        };

        let mut state = self.state.lock().map_err(poisoned)?;
        state.writer.append(&PersonRecord::live(&person)?)?;
        state.persons.put(person.clone());
        Ok(person)
    }

    async fn update_by_id(
        &self,
        id: &PersonId,
        update: PersonUpdate,
    ) -> StoreResult<Option<Person>> {
        let mut state = self.state.lock().map_err(poisoned)?;
        let Some(mut person) = state.persons.get(id).cloned() else {
            return Ok(None);
        };

        update.apply_to(&mut person);
        state.writer.append(&PersonRecord::live(&person)?)?;
        state.persons.put(person.clone());
        Ok(Some(person))
    }

    async fn delete_by_id(&self, id: &PersonId) -> StoreResult<Option<Person>> {
        let mut state = self.state.lock().map_err(poisoned)?;
        if state.persons.get(id).is_none() {
            return Ok(None);
        }

        state.writer.append(&PersonRecord::tombstone(id))?;
        Ok(state.persons.remove(id))
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.state.lock().map_err(poisoned)?.persons.len())
    }
}
