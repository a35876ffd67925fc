//! File-backed cache store for upstream API snapshots.
//!
//! Each namespace is one flat JSON object on disk mapping keys to
//! timestamped entries. The in-memory map guarded by a mutex is the primary
//! store; the file is a durability backstop rewritten on every save.
//! Any read or parse failure on the backing file is treated as a cold cache,
//! never a fatal error.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// A timestamped cache entry. Valid while `now - fetched_at <= ttl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub payload: Value,
    pub fetched_at: DateTime<Utc>,
}

type Namespace = HashMap<String, CacheEntry>;

/// Process-local key-value store with one JSON file per namespace.
#[derive(Debug)]
pub struct CacheStore {
    dir: PathBuf,
    namespaces: Mutex<HashMap<String, Namespace>>,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            namespaces: Mutex::new(HashMap::new()),
        }
    }

    fn file_path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }

    /// Returns the mapping for a namespace, reading the backing file on the
    /// first access. Absent or unreadable files yield an empty mapping.
    pub fn load(&self, namespace: &str) -> Namespace {
        let mut namespaces = self.namespaces.lock().expect("cache mutex poisoned");
        if let Some(mapping) = namespaces.get(namespace) {
            return mapping.clone();
        }
        let mapping = self.read_file(namespace);
        namespaces.insert(namespace.to_string(), mapping.clone());
        mapping
    }

    /// Replaces the namespace in memory and atomically rewrites its file.
    /// A failed disk write is reported but leaves the in-memory state intact.
    pub fn save(&self, namespace: &str, mapping: Namespace) -> std::io::Result<()> {
        {
            let mut namespaces = self.namespaces.lock().expect("cache mutex poisoned");
            namespaces.insert(namespace.to_string(), mapping.clone());
        }
        self.write_file(namespace, &mapping)
    }

    /// Returns the payload for `key` only if the entry is no older than `ttl`.
    pub fn get_valid(&self, namespace: &str, key: &str, ttl: Duration) -> Option<Value> {
        self.get_valid_at(namespace, key, ttl, Utc::now())
    }

    fn get_valid_at(
        &self,
        namespace: &str,
        key: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Option<Value> {
        let mapping = self.load(namespace);
        let entry = mapping.get(key)?;
        if now - entry.fetched_at <= ttl {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Stores a payload under `key` stamped with the current time.
    pub fn put(&self, namespace: &str, key: &str, payload: Value) -> std::io::Result<()> {
        self.put_at(namespace, key, payload, Utc::now())
    }

    pub(crate) fn put_at(
        &self,
        namespace: &str,
        key: &str,
        payload: Value,
        fetched_at: DateTime<Utc>,
    ) -> std::io::Result<()> {
        let mut mapping = self.load(namespace);
        mapping.insert(
            key.to_string(),
            CacheEntry {
                payload,
                fetched_at,
            },
        );
        self.save(namespace, mapping)
    }

    /// Removes a key and persists the namespace. No-op if the key is absent.
    pub fn evict(&self, namespace: &str, key: &str) -> std::io::Result<()> {
        let mut mapping = self.load(namespace);
        if mapping.remove(key).is_none() {
            return Ok(());
        }
        self.save(namespace, mapping)
    }

    fn read_file(&self, namespace: &str) -> Namespace {
        let Ok(content) = fs::read_to_string(self.file_path(namespace)) else {
            return Namespace::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn write_file(&self, namespace: &str, mapping: &Namespace) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(mapping)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        // Write-then-rename so readers never observe a partial file.
        let tmp = self.dir.join(format!("{namespace}.json.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.file_path(namespace))
    }
}
