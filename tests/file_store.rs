//! File Store Durability Tests
//!
//! The person log is append-only and checksum-verified. Every
//! acknowledged write must survive a reopen, and a damaged log must
//! refuse to open rather than serve a partial phonebook.

use phonebook::person::{NewPerson, PersonInput, PersonUpdate};
use phonebook::phonebook::{Phonebook, PhonebookError};
use phonebook::store::{
    FilePersonStore, PersonFilter, PersonStore, RecordReader, StoreError, STORE_FILE_NAME,
};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn create_temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn open(dir: &TempDir) -> FilePersonStore {
    FilePersonStore::open(dir.path()).expect("Failed to open store")
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_inserts_survive_reopen() {
    let temp_dir = create_temp_data_dir();

    let (ada, grace) = {
        let store = open(&temp_dir);
        let ada = store.insert(NewPerson::new("Ada", "123")).await.unwrap();
        let grace = store.insert(NewPerson::new("Grace", "456")).await.unwrap();
        (ada, grace)
    };

    let store = open(&temp_dir);
    assert_eq!(store.find_all().await.unwrap(), vec![ada.clone(), grace]);
    assert_eq!(store.find_by_id(&ada.id).await.unwrap(), Some(ada));
}

#[tokio::test]
async fn test_update_keeps_position_after_reopen() {
    let temp_dir = create_temp_data_dir();

    let (ada, grace) = {
        let store = open(&temp_dir);
        let ada = store.insert(NewPerson::new("Ada", "123")).await.unwrap();
        let grace = store.insert(NewPerson::new("Grace", "456")).await.unwrap();
        let update = PersonUpdate {
            name: None,
            number: Some("789".to_string()),
        };
        let ada = store.update_by_id(&ada.id, update).await.unwrap().unwrap();
        (ada, grace)
    };

    let store = open(&temp_dir);
    let all = store.find_all().await.unwrap();
    assert_eq!(all, vec![ada, grace]);
    assert_eq!(all[0].number, "789");
}

#[tokio::test]
async fn test_deletes_survive_reopen() {
    let temp_dir = create_temp_data_dir();

    let grace = {
        let store = open(&temp_dir);
        let ada = store.insert(NewPerson::new("Ada", "123")).await.unwrap();
        let grace = store.insert(NewPerson::new("Grace", "456")).await.unwrap();
        store.delete_by_id(&ada.id).await.unwrap().unwrap();
        grace
    };

    let store = open(&temp_dir);
    assert_eq!(store.find_all().await.unwrap(), vec![grace]);
    assert_eq!(store.count().await.unwrap(), 1);
    assert!(store
        .find_one(&PersonFilter::Name("Ada".to_string()))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_log_holds_one_record_per_write() {
    let temp_dir = create_temp_data_dir();
    {
        let store = open(&temp_dir);
        let ada = store.insert(NewPerson::new("Ada", "123")).await.unwrap();
        store
            .update_by_id(&ada.id, PersonUpdate::default())
            .await
            .unwrap();
        store.delete_by_id(&ada.id).await.unwrap();
        // Misses write nothing
        store.delete_by_id(&ada.id).await.unwrap();
    }

    let mut reader = RecordReader::open(&temp_dir.path().join(STORE_FILE_NAME)).unwrap();
    let records = reader.read_all().unwrap();
    assert_eq!(records.len(), 3);
    assert!(!records[0].is_tombstone);
    assert!(!records[1].is_tombstone);
    assert!(records[2].is_tombstone);
}

// =============================================================================
// Corruption
// =============================================================================

#[tokio::test]
async fn test_flipped_byte_fails_open() {
    let temp_dir = create_temp_data_dir();
    {
        let store = open(&temp_dir);
        store.insert(NewPerson::new("Ada", "123")).await.unwrap();
    }

    let path = temp_dir.path().join(STORE_FILE_NAME);
    let mut contents = fs::read(&path).unwrap();
    let mid = contents.len() / 2;
    contents[mid] ^= 0xFF;
    fs::write(&path, contents).unwrap();

    match FilePersonStore::open(temp_dir.path()) {
        Err(StoreError::Corruption { offset, .. }) => assert_eq!(offset, 0),
        Err(other) => panic!("expected corruption, got {other}"),
        Ok(_) => panic!("corrupted log opened"),
    }
}

#[tokio::test]
async fn test_truncated_tail_fails_open() {
    let temp_dir = create_temp_data_dir();
    {
        let store = open(&temp_dir);
        store.insert(NewPerson::new("Ada", "123")).await.unwrap();
    }

    let path = temp_dir.path().join(STORE_FILE_NAME);
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&[0x40, 0x00]).unwrap();
    drop(file);

    let err = FilePersonStore::open(temp_dir.path()).err().unwrap();
    assert!(matches!(err, StoreError::Corruption { .. }));
}

// =============================================================================
// Phonebook over the file store
// =============================================================================

#[tokio::test]
async fn test_duplicate_check_sees_persisted_people() {
    let temp_dir = create_temp_data_dir();
    {
        let phonebook = Phonebook::new(open(&temp_dir));
        phonebook
            .create(PersonInput::new("Ada", "123"))
            .await
            .unwrap();
    }

    let phonebook = Phonebook::new(open(&temp_dir));
    let err = phonebook
        .create(PersonInput::new("Ada", "999"))
        .await
        .unwrap_err();
    assert!(matches!(err, PhonebookError::DuplicateName));

    let err = phonebook
        .create(PersonInput::new("Grace", "123"))
        .await
        .unwrap_err();
    assert!(matches!(err, PhonebookError::DuplicateNumber));

    assert_eq!(phonebook.count().await.unwrap(), 1);
}

// =============================================================================
// Read-only load
// =============================================================================

#[tokio::test]
async fn test_load_replays_without_writing() {
    let temp_dir = create_temp_data_dir();
    let ada = {
        let store = open(&temp_dir);
        store.insert(NewPerson::new("Ada", "123")).await.unwrap()
    };

    assert_eq!(FilePersonStore::load(temp_dir.path()).unwrap(), vec![ada]);

    let missing = temp_dir.path().join("missing");
    let err = FilePersonStore::load(&missing).err().unwrap();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(!missing.exists());
}
