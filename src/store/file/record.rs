//! On-disk person record
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, whole record including this field)
//! +------------------+
//! | Person ID        | (length-prefixed string)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Body             | (length-prefixed JSON `{name, number}`)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! The checksum covers every byte before it.

use std::io::{self, Cursor, Read};

use serde::{Deserialize, Serialize};

use crate::person::{Person, PersonId};
use crate::store::{StoreError, StoreResult};

use super::checksum::compute_checksum;

/// len + id len + tombstone + body len + checksum
pub(super) const MIN_RECORD_SIZE: usize = 4 + 4 + 1 + 4 + 4;

#[derive(Debug, Serialize, Deserialize)]
struct PersonBody {
    name: String,
    number: String,
}

/// One appended entry of the person file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub person_id: String,
    pub is_tombstone: bool,
    pub body: Vec<u8>,
}

impl PersonRecord {
    /// Record carrying the current state of `person`
    pub fn live(person: &Person) -> StoreResult<Self> {
        let body = serde_json::to_vec(&PersonBody {
            name: person.name.clone(),
            number: person.number.clone(),
        })?;
        Ok(Self {
            person_id: person.id.to_string(),
            is_tombstone: false,
            body,
        })
    }

    /// Record marking `id` as deleted
    pub fn tombstone(id: &PersonId) -> Self {
        Self {
            person_id: id.to_string(),
            is_tombstone: true,
            body: Vec::new(),
        }
    }

    /// Decode the person carried by a live record
    pub fn to_person(&self) -> StoreResult<Person> {
        let id = PersonId::parse(&self.person_id)?;
        let body: PersonBody = serde_json::from_slice(&self.body)?;
        Ok(Person {
            id,
            name: body.name,
            number: body.number,
        })
    }

    /// Serialize the complete record, length prefix and checksum included
    pub fn serialize(&self) -> Vec<u8> {
        let record_length = (MIN_RECORD_SIZE + self.person_id.len() + self.body.len()) as u32;

        let mut buf = Vec::with_capacity(record_length as usize);
        buf.extend_from_slice(&record_length.to_le_bytes());
        buf.extend_from_slice(&(self.person_id.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.person_id.as_bytes());
        buf.push(u8::from(self.is_tombstone));
        buf.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.body);

        let checksum = compute_checksum(&buf);
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf
    }

    /// Deserialize one complete record, verifying its checksum.
    ///
    /// `offset` is the record's position in the file and only feeds error
    /// messages.
    pub fn deserialize(data: &[u8], offset: u64) -> StoreResult<Self> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(StoreError::corruption(offset, "Record too short"));
        }

        let checksum_at = data.len() - 4;
        let mut stored = [0u8; 4];
        stored.copy_from_slice(&data[checksum_at..]);
        let stored = u32::from_le_bytes(stored);
        let computed = compute_checksum(&data[..checksum_at]);
        if stored != computed {
            return Err(StoreError::corruption(
                offset,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    computed, stored
                ),
            ));
        }

        let mut cursor = Cursor::new(&data[4..checksum_at]);
        Self::read_fields(&mut cursor).map_err(|e| StoreError::corruption(offset, e.to_string()))
    }

    fn read_fields<R: Read>(reader: &mut R) -> io::Result<Self> {
        let person_id = String::from_utf8(read_prefixed(reader)?)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut flag = [0u8; 1];
        reader.read_exact(&mut flag)?;
        let is_tombstone = match flag[0] {
            0 => false,
            1 => true,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid tombstone flag: {}", other),
                ))
            }
        };

        let body = read_prefixed(reader)?;

        Ok(Self {
            person_id,
            is_tombstone,
            body,
        })
    }
}

fn read_prefixed<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let mut buf = vec![0u8; u32::from_le_bytes(len_buf) as usize];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
