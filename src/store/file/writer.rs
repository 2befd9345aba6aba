//! Append-only writer for the person file
//!
//! Records are never rewritten in place. Each append is fsynced before it
//! returns, so an acknowledged write survives a crash.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::store::{StoreError, StoreResult};

use super::record::PersonRecord;

/// Appends person records to a single file
pub struct RecordWriter {
    path: PathBuf,
    file: File,
    current_offset: u64,
}

impl RecordWriter {
    /// Opens or creates the file at `path`, creating parent directories
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::io(
                        format!("Failed to create data directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                StoreError::io(format!("Failed to open person file: {}", path.display()), e)
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read person file metadata", e))?
            .len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            current_offset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Offset the next record will be written at
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends `record` and fsyncs. Returns the offset it was written at.
    ///
    /// A failed append cuts the file back to the previous record boundary,
    /// so a torn record never sits in front of later writes.
    pub fn append(&mut self, record: &PersonRecord) -> StoreResult<u64> {
        let bytes = record.serialize();
        let offset = self.current_offset;

        if let Err(e) = self.write_synced(&bytes) {
            let err = StoreError::io(format!("Failed to append person {}", record.person_id), e);
            self.discard_torn_tail()?;
            return Err(err);
        }

        self.current_offset += bytes.len() as u64;
        Ok(offset)
    }

    fn write_synced(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes)?;
        self.file.sync_all()
    }

    /// Truncates anything past the last complete record
    pub(super) fn discard_torn_tail(&mut self) -> StoreResult<()> {
        self.file
            .set_len(self.current_offset)
            .and_then(|()| self.file.sync_all())
            .map_err(|e| {
                StoreError::io(
                    format!("Failed to discard torn record at offset {}", self.current_offset),
                    e,
                )
            })
    }
}
