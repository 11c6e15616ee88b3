//! JSON persistence for records and user preferences.
//!
//! # Responsibility
//! - Load and save the whole record document and the preferences document.
//! - Keep structural decoding (serde) separate from domain validation.
//!
//! # Invariants
//! - Loads never hand out partially-validated data: any missing or invalid
//!   field rejects the whole document.
//! - Saves are whole-file overwrites; there is no incremental persistence.

pub mod data;
pub mod prefs;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use crate::model::store::RecordStore;
use crate::storage::data::StoredRecordBook;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while reading or writing a persisted document.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Structurally valid JSON whose content violates a domain constraint.
    IllegalValue(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::IllegalValue(message) => f.write_str(message),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::IllegalValue(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Reads the record document at `path`.
///
/// Returns `Ok(None)` when the file does not exist yet; the caller decides
/// how to start fresh.
pub fn load_records(path: &Path) -> StorageResult<Option<RecordStore>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    let stored: StoredRecordBook = serde_json::from_str(&text)?;
    let store = stored.into_store()?;
    log::info!(
        "event=records_loaded module=storage status=ok persons={} modules={}",
        store.persons().len(),
        store.modules().len()
    );
    Ok(Some(store))
}

/// Overwrites the record document at `path` with the whole store.
pub fn save_records(path: &Path, store: &RecordStore) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let stored = StoredRecordBook::from_store(store);
    let text = serde_json::to_string_pretty(&stored)?;
    fs::write(path, text)?;
    Ok(())
}
