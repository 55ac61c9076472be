//! File-backed storage
//!
//! All keys live in one JSON object (`storage.json`). Writes go through a
//! temp file in the same directory and an atomic rename, under an exclusive
//! lock on a sidecar `.lock` file so two CLI processes do not interleave a
//! read-modify-write.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStorage;

/// Default filename inside the bankline directory
pub const STORAGE_FILENAME: &str = "storage.json";

/// JSON-file storage adapter
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage at `dir/storage.json`; the directory is created on first write
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORAGE_FILENAME))
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| STORAGE_FILENAME.into());
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn lock(&self) -> Result<File> {
        fs::create_dir_all(self.parent_dir())?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        file.lock_exclusive()
            .map_err(|e| Error::storage(format!("Failed to lock storage file: {}", e)))?;
        Ok(file)
    }

    /// Read the whole map.
    ///
    /// A file that is not a JSON object of strings is treated as empty; it
    /// will be replaced on the next write.
    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "storage file is corrupt, ignoring its contents"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| Error::storage(format!("Failed to replace storage file: {}", e)))?;
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let lock = self.lock()?;
        let mut entries = self.read_all()?;
        let changed = f(&mut entries);
        let result = if changed {
            self.write_all(&entries)
        } else {
            Ok(())
        };
        let _ = lock.unlock();
        result
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|entries| entries.remove(key).is_some())
    }
}
