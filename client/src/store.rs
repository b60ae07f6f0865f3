//! Local key-value store for symptom logs and the action checklist

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use shared::persisted::{
    decode_checklist, decode_history, encode_checklist, encode_history, CHECKLIST_KEY,
    HISTORY_KEY,
};
use shared::{ActionChecklist, SymptomLog};

use crate::error::{AppError, AppResult};

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn put(&self, key: &str, value: &str) -> AppResult<()>;
}

/// One JSON file per key under a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Storage(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        // Staged write, then an atomic replace
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)
            .and_then(|_| fs::rename(&staging, &path))
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", key, e)))
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every write fails, for exercising persistence errors
    pub fn rejecting_writes() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        if self.reject_writes {
            return Err(AppError::Storage(format!("write rejected for {}", key)));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Everything restored from the store at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub history: Vec<SymptomLog>,
    pub checklist: ActionChecklist,
}

/// Read persisted state. Unreadable records count as absent.
pub fn load_state(store: &dyn KeyValueStore) -> PersistedState {
    let read = |key: &str| match store.get(key) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable {} record: {}", key, e);
            String::new()
        }
    };

    let history = decode_history(&read(HISTORY_KEY));
    let checklist = decode_checklist(&read(CHECKLIST_KEY));
    tracing::debug!(entries = history.len(), "Loaded persisted state");

    PersistedState { history, checklist }
}

pub fn save_history(store: &dyn KeyValueStore, history: &[SymptomLog]) -> AppResult<()> {
    store.put(HISTORY_KEY, &encode_history(history))
}

pub fn save_checklist(store: &dyn KeyValueStore, checklist: &ActionChecklist) -> AppResult<()> {
    store.put(CHECKLIST_KEY, &encode_checklist(checklist))
}
