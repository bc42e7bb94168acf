//! In-memory bucket
//!
//! Holds objects in a map and can be told to fail for specific keys. Every `get`
//! is counted so callers can check how many reads a request performed.

use async_trait::async_trait;
use hyper::body::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use super::{ObjectLookup, ObjectStore, StorageError, StoredObject};

#[derive(Debug, Clone)]
enum Entry {
    Object(Bytes),
    Failure(String),
}

#[derive(Debug, Default)]
pub struct MemoryBucket {
    entries: RwLock<HashMap<String, Entry>>,
    reads: AtomicUsize,
    last_key: RwLock<Option<String>>,
}

impl MemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `key`, replacing any previous entry
    pub fn insert(&self, key: impl Into<String>, data: impl Into<Bytes>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), Entry::Object(data.into()));
        }
    }

    /// Make reads of `key` fail with a backend error
    pub fn fail(&self, key: impl Into<String>, message: impl Into<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), Entry::Failure(message.into()));
        }
    }

    /// Number of `get` calls served so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Key passed to the most recent `get`
    pub fn last_key(&self) -> Option<String> {
        self.last_key.read().ok().and_then(|k| k.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryBucket {
    async fn get(&self, key: &str) -> ObjectLookup {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_key.write() {
            *last = Some(key.to_string());
        }

        let entry = match self.entries.read() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => {
                return ObjectLookup::Failed(StorageError::Unavailable(
                    "bucket lock poisoned".to_string(),
                ))
            }
        };

        match entry {
            Some(Entry::Object(data)) => ObjectLookup::Found(StoredObject::from_bytes(data)),
            Some(Entry::Failure(message)) => {
                ObjectLookup::Failed(StorageError::Unavailable(message))
            }
            None => ObjectLookup::NotFound,
        }
    }
}
