use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NoteboxError, Result};

pub const STORAGE_FILE: &str = "storage.json";

/// Synchronous string key-value storage, shaped like a browser's
/// `localStorage`: whole string values under string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Bytes used by a set of entries, counting keys and values.
fn used_bytes<'a>(entries: impl Iterator<Item = (&'a String, &'a String)>) -> u64 {
    entries.map(|(k, v)| (k.len() + v.len()) as u64).sum()
}

fn quota_exceeded(key: &str, needed: u64, quota: u64) -> NoteboxError {
    NoteboxError::StorageWrite {
        key: key.to_string(),
        reason: format!("quota exceeded ({} bytes needed, {} allowed)", needed, quota),
    }
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
    quota_bytes: Option<u64>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            let others = used_bytes(self.entries.iter().filter(|(k, _)| k.as_str() != key));
            let needed = others + (key.len() + value.len()) as u64;
            if needed > quota {
                return Err(quota_exceeded(key, needed, quota));
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON file mapping keys to string values.
///
/// Entries are read once on open; every `set` rewrites the file through a
/// temporary file and a rename, and only then updates the in-memory copy.
#[derive(Debug)]
pub struct FileKv {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    quota_bytes: Option<u64>,
}

impl FileKv {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>, quota_bytes: Option<u64>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    NoteboxError::Storage(format!("corrupt storage file {}: {e}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries,
            quota_bytes,
        })
    }

    /// Create an empty storage file at `path`.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::write(&path, "{}")?;
        Ok(Self {
            path,
            entries: BTreeMap::new(),
            quota_bytes: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes used by all stored keys and values.
    pub fn used_bytes(&self) -> u64 {
        used_bytes(self.entries.iter())
    }

    pub fn quota_bytes(&self) -> Option<u64> {
        self.quota_bytes
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        let result = fs::write(&tmp, raw).and_then(|()| fs::rename(&tmp, &self.path));
        if result.is_err() && tmp.exists() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value);

        if let Some(quota) = self.quota_bytes {
            let needed = used_bytes(next.iter());
            if needed > quota {
                return Err(quota_exceeded(key, needed, quota));
            }
        }

        self.write_entries(&next)
            .map_err(|e| NoteboxError::StorageWrite {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        self.entries = next;
        Ok(())
    }
}
