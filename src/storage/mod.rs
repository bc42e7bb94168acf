//! Object storage module
//!
//! The dispatcher reads flag images from a key-addressed blob store. The store is
//! injected as an `Arc<dyn ObjectStore>` so tests can swap in a [`MemoryBucket`].
//!
//! A lookup has three outcomes that must stay distinct:
//! - `Found`: the object exists and its body can be streamed
//! - `NotFound`: nothing is stored under the key (a normal outcome)
//! - `Failed`: the backend itself could not answer

mod fs;
mod memory;

pub use fs::FsBucket;
pub use memory::MemoryBucket;

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use std::sync::Arc;
use thiserror::Error;

use crate::config::StorageConfig;
use crate::http::ResponseBody;

/// Errors raised by a storage backend, as opposed to a missing object
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid object key: {0:?}")]
    InvalidKey(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// An object read from the store
pub struct StoredObject {
    /// Object contents, streamed as they are read
    pub body: ResponseBody,
    /// Size in bytes, when the backend knows it up front
    pub size: Option<u64>,
}

impl StoredObject {
    /// Wrap an in-memory blob
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let size = u64::try_from(data.len()).ok();
        Self {
            body: Full::new(data).map_err(|never| match never {}).boxed(),
            size,
        }
    }
}

impl std::fmt::Debug for StoredObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredObject")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Result of a single `get` against the store
#[derive(Debug)]
pub enum ObjectLookup {
    Found(StoredObject),
    NotFound,
    Failed(StorageError),
}

/// Read-only, key-addressed blob store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the object stored under `key`
    async fn get(&self, key: &str) -> ObjectLookup;
}

/// Build the store selected by configuration
pub fn from_config(config: &StorageConfig) -> Arc<dyn ObjectStore> {
    match config {
        StorageConfig::Filesystem { root } => Arc::new(FsBucket::new(root)),
    }
}
