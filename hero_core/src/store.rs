//! Persistence of the ledger snapshot as a single JSON blob.
//!
//! A store holds one record under one key. Missing or unreadable data is
//! never an error: it loads as an empty snapshot and a warning is logged.

use crate::{Error, LedgerSnapshot, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage key used by the browser version of the tracker
pub const DEFAULT_STORAGE_KEY: &str = "evans-exercises-v4";

/// Load/save boundary for the ledger blob
pub trait LedgerStore {
    /// Read the stored snapshot, or an empty one if there is none
    fn load(&self) -> Result<LedgerSnapshot>;

    /// Overwrite the stored snapshot
    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()>;
}

fn decode(contents: &str, origin: impl Display) -> LedgerSnapshot {
    match serde_json::from_str::<LedgerSnapshot>(contents) {
        Ok(snapshot) => {
            tracing::debug!(
                "Loaded {} stored days from {}",
                snapshot.workouts.len(),
                origin
            );
            snapshot
        }
        Err(e) => {
            tracing::warn!("Failed to parse ledger from {}: {}. Starting fresh.", origin, e);
            LedgerSnapshot::default()
        }
    }
}

// ============================================================================
// File Store
// ============================================================================

/// JSON file store with file locking
///
/// The blob for key `k` lives at `<data_dir>/k.json`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: &Path, key: &str) -> Self {
        Self::at(data_dir.join(format!("{}.json", key)))
    }

    /// Store backed by an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<LedgerSnapshot> {
        let path = &self.path;
        if !path.exists() {
            tracing::info!("No ledger file found, starting fresh");
            return Ok(LedgerSnapshot::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open ledger file {:?}: {}. Starting fresh.", path, e);
                return Ok(LedgerSnapshot::default());
            }
        };

        // Shared lock so we never read a half-written file
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock ledger file {:?}: {}. Starting fresh.", path, e);
            return Ok(LedgerSnapshot::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read ledger file {:?}: {}. Starting fresh.", path, e);
            return Ok(LedgerSnapshot::default());
        }

        file.unlock()?;
        Ok(decode(&contents, path.display()))
    }

    /// Atomically replaces the file: temp file, fsync, rename
    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::Storage(format!("{:?} has no parent directory", self.path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(snapshot)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved ledger to {:?}", self.path);
        Ok(())
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-process key-value store holding raw JSON strings
///
/// Behaves like browser local storage: values are stored serialized, so
/// corrupt entries can be injected and are handled the same way as on disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    key: String,
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: HashMap::new(),
        }
    }

    /// Store whose key already holds `raw`
    pub fn with_raw(key: impl Into<String>, raw: impl Into<String>) -> Self {
        let mut store = Self::new(key);
        store.entries.insert(store.key.clone(), raw.into());
        store
    }

    /// The raw stored value, if anything was saved
    pub fn raw(&self) -> Option<&str> {
        self.entries.get(&self.key).map(String::as_str)
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<LedgerSnapshot> {
        match self.raw() {
            Some(raw) => Ok(decode(raw, format_args!("memory key {:?}", self.key))),
            None => Ok(LedgerSnapshot::default()),
        }
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()> {
        let raw = serde_json::to_string(snapshot)?;
        self.entries.insert(self.key.clone(), raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DayRecord;

    fn sample_snapshot() -> LedgerSnapshot {
        let mut snapshot = LedgerSnapshot::default();
        let mut day = DayRecord::with_hero_exercises();
        day.exercises[0].completed = true;
        snapshot.workouts.insert("2026-03-01".into(), day);
        snapshot.total_points = 10;
        snapshot
    }

    #[test]
    fn test_file_save_and_load_roundtrip() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path(), DEFAULT_STORAGE_KEY);

        store.save(&sample_snapshot()).unwrap();
        assert!(temp_dir.path().join("evans-exercises-v4.json").exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, sample_snapshot());
    }

    #[test]
    fn test_file_load_nonexistent_returns_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at(temp_dir.path().join("missing.json"));

        assert_eq!(store.load().unwrap(), LedgerSnapshot::default());
    }

    #[test]
    fn test_file_corrupted_returns_default() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let loaded = JsonFileStore::at(&path).load().unwrap();
        assert_eq!(loaded, LedgerSnapshot::default());
    }

    #[test]
    fn test_file_reads_browser_blob() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{"workouts":{"2026-01-05":{"exercises":[{"id":"x1","name":"Push Ups","completed":true,"isHero":true}],"bonusAwarded":false}},"totalPoints":10}"#,
        )
        .unwrap();

        let loaded = JsonFileStore::at(&path).load().unwrap();
        assert_eq!(loaded.total_points, 10);
        assert_eq!(loaded.workouts["2026-01-05"].exercises[0].id, "x1");
    }

    #[test]
    fn test_file_partial_blob_defaults_missing_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(&path, r#"{"totalPoints":40}"#).unwrap();

        let loaded = JsonFileStore::at(&path).load().unwrap();
        assert_eq!(loaded.total_points, 40);
        assert!(loaded.workouts.is_empty());
    }

    #[test]
    fn test_file_atomic_save() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path(), "ledger");

        store.save(&LedgerSnapshot::default()).unwrap();
        store.save(&sample_snapshot()).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "ledger.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only ledger.json, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_file_save_creates_data_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(&temp_dir.path().join("nested/data"), "ledger");

        store.save(&sample_snapshot()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new(DEFAULT_STORAGE_KEY);
        assert!(store.raw().is_none());
        assert_eq!(store.load().unwrap(), LedgerSnapshot::default());

        store.save(&sample_snapshot()).unwrap();
        assert!(store.raw().unwrap().contains("\"totalPoints\":10"));
        assert_eq!(store.load().unwrap(), sample_snapshot());
    }

    #[test]
    fn test_memory_store_corrupt_entry_returns_default() {
        let store = MemoryStore::with_raw(DEFAULT_STORAGE_KEY, "not json at all");
        assert_eq!(store.load().unwrap(), LedgerSnapshot::default());
    }
}
