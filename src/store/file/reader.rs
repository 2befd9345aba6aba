//! Sequential reader over the person file
//!
//! Every record is checksum-verified. A truncated tail or a checksum
//! failure stops the scan with [`StoreError::Corruption`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::store::{StoreError, StoreResult};

use super::record::{PersonRecord, MIN_RECORD_SIZE};

/// Reads person records front to back
pub struct RecordReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl RecordReader {
    /// Opens the person file for reading
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| {
            StoreError::io(format!("Failed to open person file: {}", path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read person file metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Byte offset of the next record
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Reads the next record, or `None` at end of file
    pub fn read_next(&mut self) -> StoreResult<Option<PersonRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let offset = self.current_offset;
        let remaining = self.file_size - offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                offset,
                format!(
                    "Truncated record: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption(offset, format!("Failed to read record length: {}", e))
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                offset,
                format!("Invalid record length: {}", record_length),
            ));
        }
        if record_length > remaining {
            return Err(StoreError::corruption(
                offset,
                format!(
                    "Record length {} exceeds remaining file size {}",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            StoreError::corruption(offset, format!("Failed to read record body: {}", e))
        })?;

        let record = PersonRecord::deserialize(&record_buf, offset)?;
        self.current_offset += record_length;
        Ok(Some(record))
    }

    /// Reads every remaining record
    pub fn read_all(&mut self) -> StoreResult<Vec<PersonRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::PersonId;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_records_in_file_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("persons.dat");

        let first = PersonRecord::tombstone(&PersonId::generate());
        let second = PersonRecord::tombstone(&PersonId::generate());
        let mut bytes = first.serialize();
        bytes.extend(second.serialize());
        fs::write(&path, bytes).unwrap();

        let mut reader = RecordReader::open(&path).unwrap();
        assert_eq!(reader.read_all().unwrap(), vec![first, second]);
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_truncated_tail_is_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("persons.dat");

        let mut bytes = PersonRecord::tombstone(&PersonId::generate()).serialize();
        let full = bytes.len() as u64;
        bytes.extend(PersonRecord::tombstone(&PersonId::generate()).serialize());
        bytes.truncate(bytes.len() - 3);
        fs::write(&path, bytes).unwrap();

        let mut reader = RecordReader::open(&path).unwrap();
        assert!(reader.read_next().unwrap().is_some());
        let err = reader.read_next().unwrap_err();
        assert!(matches!(err, StoreError::Corruption { offset, .. } if offset == full));
    }
}
