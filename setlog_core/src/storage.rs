//! Durable key-value substrate for session state.
//!
//! The session store persists its three collections through this interface.
//! The file-backed implementation writes one JSON file per slot with file
//! locking and atomic replace so the durable copy never reflects a state the
//! in-memory copy didn't pass through.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Persisted slot keys used by the session store
pub mod keys {
    pub const ACTIVE_WORKOUT: &str = "active_workout";
    pub const WORKOUT_HISTORY: &str = "workout_history";
    pub const ROUTINES: &str = "routines";
}

/// Opaque durable key-value store for serialized state slots
pub trait StateStore {
    /// Read a slot; `None` if the slot is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot, replacing any previous payload
    fn set(&mut self, key: &str, payload: &str) -> Result<()>;

    /// Remove a slot; absent slots are left absent
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// File-backed store: one `<key>.json` file per slot under a data directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given data directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStore for FileStore {
    /// Read a slot with shared locking
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        tracing::debug!("Read slot '{}' from {:?}", key, path);
        Ok(Some(contents))
    }

    /// Write a slot atomically:
    /// 1. Write to a temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the slot file
    fn set(&mut self, key: &str, payload: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let temp = NamedTempFile::new_in(&self.dir)?;

        // Exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(payload.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        let path = self.slot_path(key);
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote slot '{}' to {:?}", key, path);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Deleted slot '{}' at {:?}", key, path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and embedding
#[derive(Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, payload: &str) -> Result<()> {
        self.slots.insert(key.into(), payload.into());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}
