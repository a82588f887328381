//! Record persistence behind a small repository interface
//!
//! The calculators never touch storage. Callers load a record list, mutate it
//! through a book or ledger, and save the whole list back (last write wins).

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Load/save access to a list of records
pub trait Repository<T> {
    fn load(&self) -> Result<Vec<T>, StoreError>;
    fn save(&self, records: &[T]) -> Result<(), StoreError>;
}

/// JSON array persisted to a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _records: PhantomData,
        }
    }

    /// Store named `<name>.json` inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P, name: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> Repository<T> for JsonFileStore<T> {
    fn load(&self) -> Result<Vec<T>, StoreError> {
        if !self.path.exists() {
            log::debug!("{} does not exist yet, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let records: Vec<T> = serde_json::from_reader(reader)?;
        log::debug!("loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn save(&self, records: &[T]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        log::debug!("saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// In-memory repository, mainly for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    records: RefCell<Vec<T>>,
}

impl<T: Clone> MemoryStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }
}

impl<T: Clone> Repository<T> for MemoryStore<T> {
    fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[T]) -> Result<(), StoreError> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}

/// Millisecond timestamp id, bumped past any id already taken
pub fn next_timestamp_id<'a, I>(taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<i64> = taken.into_iter().filter_map(|id| id.parse().ok()).collect();
    let mut candidate = Utc::now().timestamp_millis();
    while taken.contains(&candidate) {
        candidate += 1;
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: String,
        amount: f64,
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "finance_toolkit_{}_{}_{}",
            name,
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = scratch_dir("round_trip");
        let store: JsonFileStore<Record> = JsonFileStore::in_dir(&dir, "records");

        assert!(store.load().unwrap().is_empty());

        let records = vec![
            Record { id: "1".into(), amount: 45.99 },
            Record { id: "2".into(), amount: 12.5 },
        ];
        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);

        // Last write wins
        store.save(&records[..1]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let dir = scratch_dir("garbage");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(&path, "not json").unwrap();

        let store: JsonFileStore<Record> = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new(vec![Record { id: "a".into(), amount: 1.0 }]);
        assert_eq!(store.load().unwrap().len(), 1);
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_timestamp_ids_are_unique() {
        let first = next_timestamp_id(std::iter::empty());
        let second = next_timestamp_id([first.as_str()]);
        assert_ne!(first, second);
        assert!(second.parse::<i64>().unwrap() >= first.parse::<i64>().unwrap());
    }
}
