//! Durable key-value storage boundary.
//!
//! # Responsibilities
//! - Abstract the local storage the breaker persists into
//! - Provide an in-memory implementation for tests and ephemeral use
//! - Provide a JSON-file-backed implementation for real deployments
//!
//! # Design Decisions
//! - Operations are synchronous and best-effort; a write that fails is
//!   swallowed, since persistence is an optimization rather than a
//!   correctness requirement
//! - `keys()` exists so the session evictor can scan for token keys
//! - One logical owner per store; concurrent processes racing on the
//!   same file are not coordinated

use dashmap::DashMap;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Synchronous key-value storage with string keys and values.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. Best-effort.
    fn set(&self, key: &str, value: &str);

    /// Remove `key` if present. Best-effort.
    fn remove(&self, key: &str);

    /// All currently stored keys, in no particular order.
    fn keys(&self) -> Vec<String>;
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.inner.iter().map(|r| r.key().clone()).collect()
    }
}

/// JSON-file-backed storage.
///
/// The whole map is rewritten on every mutation. Missing or corrupt
/// files degrade to an empty store.
#[derive(Debug)]
pub struct FileStorage {
    inner: DashMap<String, String>,
    path: PathBuf,
}

impl FileStorage {
    /// Open storage at `path`, loading any previously persisted map.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let inner = DashMap::new();

        if path.exists() {
            match File::open(&path) {
                Ok(file) => {
                    let reader = BufReader::new(file);
                    match serde_json::from_reader::<_, HashMap<String, String>>(reader) {
                        Ok(map) => {
                            for (k, v) in map {
                                inner.insert(k, v);
                            }
                        }
                        Err(e) => {
                            tracing::debug!(path = %path.display(), error = %e, "Corrupt storage file, starting empty");
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Failed to open storage file, starting empty");
                }
            }
        }

        Self { inner, path }
    }

    fn persist(&self) {
        let map: HashMap<String, String> = self
            .inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();

        let result = File::create(&self.path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &map)?;
            writer.flush()
        });

        if let Err(e) = result {
            tracing::debug!(path = %self.path.display(), error = %e, "Storage write failed, keeping in-memory state");
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&self, key: &str) {
        if self.inner.remove(key).is_some() {
            self.persist();
        }
    }

    fn keys(&self) -> Vec<String> {
        self.inner.iter().map(|r| r.key().clone()).collect()
    }
}
