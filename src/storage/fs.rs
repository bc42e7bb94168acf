//! Filesystem-backed bucket
//!
//! Each object is a regular file directly under the bucket root, named by its key.

use async_trait::async_trait;
use futures_util::stream;
use http_body_util::{BodyExt, StreamBody};
use hyper::body::{Bytes, Frame};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use super::{ObjectLookup, ObjectStore, StorageError, StoredObject};

/// Bytes read from disk per body frame
const CHUNK_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct FsBucket {
    root: PathBuf,
}

impl FsBucket {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a key to a path inside the root.
    ///
    /// Keys are flat names: separators and dot-only names never reach the filesystem.
    fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let flat = !key.is_empty()
            && !key.contains(['/', '\\', '\0'])
            && !key.chars().all(|c| c == '.');
        if flat {
            Ok(self.root.join(key))
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    async fn open(&self, key: &str) -> Result<Option<StoredObject>, StorageError> {
        let path = self.object_path(key)?;

        let file = match File::open(&path).await {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Ok(None);
        }

        let frames = stream::try_unfold(file, next_chunk);
        Ok(Some(StoredObject {
            body: StreamBody::new(frames).boxed(),
            size: Some(metadata.len()),
        }))
    }
}

/// Read the next chunk of `file`, ending the stream at EOF
async fn next_chunk(mut file: File) -> io::Result<Option<(Frame<Bytes>, File)>> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let n = file.read(&mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    buf.truncate(n);
    Ok(Some((Frame::data(Bytes::from(buf)), file)))
}

#[async_trait]
impl ObjectStore for FsBucket {
    async fn get(&self, key: &str) -> ObjectLookup {
        match self.open(key).await {
            Ok(Some(object)) => ObjectLookup::Found(object),
            Ok(None) => ObjectLookup::NotFound,
            Err(e) => ObjectLookup::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_with(files: &[(&str, &[u8])]) -> (tempfile::TempDir, FsBucket) {
        let dir = tempfile::tempdir().unwrap();
        for (name, data) in files {
            std::fs::write(dir.path().join(name), data).unwrap();
        }
        let bucket = FsBucket::new(dir.path());
        (dir, bucket)
    }

    #[tokio::test]
    async fn test_get_existing_object() {
        let (_dir, bucket) = bucket_with(&[("jp.png", &b"rising sun"[..])]);

        let ObjectLookup::Found(object) = bucket.get("jp.png").await else {
            panic!("expected object");
        };
        assert_eq!(object.size, Some(10));
        let body = object.body.collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"rising sun");
    }

    #[tokio::test]
    async fn test_large_object_streams_in_chunks() {
        let data = vec![7u8; CHUNK_SIZE * 2 + 5];
        let (_dir, bucket) = bucket_with(&[("br.png", &data[..])]);

        let ObjectLookup::Found(mut object) = bucket.get("br.png").await else {
            panic!("expected object");
        };
        let mut frames = 0;
        let mut total = 0;
        while let Some(frame) = object.body.frame().await {
            total += frame.unwrap().into_data().unwrap().len();
            frames += 1;
        }
        assert_eq!(total, data.len());
        assert!(frames >= 3);
    }

    #[tokio::test]
    async fn test_get_missing_object() {
        let (_dir, bucket) = bucket_with(&[("jp.png", &b"x"[..])]);
        assert!(matches!(bucket.get("zz.png").await, ObjectLookup::NotFound));
    }

    #[tokio::test]
    async fn test_directory_is_not_an_object() {
        let (dir, bucket) = bucket_with(&[]);
        std::fs::create_dir(dir.path().join("fr.png")).unwrap();
        assert!(matches!(bucket.get("fr.png").await, ObjectLookup::NotFound));
    }

    #[tokio::test]
    async fn test_missing_root_reads_as_not_found() {
        let bucket = FsBucket::new("/nonexistent/bucket/root");
        assert!(matches!(bucket.get("fr.png").await, ObjectLookup::NotFound));
    }

    #[tokio::test]
    async fn test_invalid_keys_fail() {
        let (_dir, bucket) = bucket_with(&[]);
        for key in ["../etc/passwd", "a/b.png", "a\\b.png", "..", ""] {
            assert!(
                matches!(
                    bucket.get(key).await,
                    ObjectLookup::Failed(StorageError::InvalidKey(_))
                ),
                "key {key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_dots_inside_a_key_are_literal() {
        let (_dir, bucket) = bucket_with(&[("gb.v2.png", &b"union"[..]), ("..png", &b"x"[..])]);
        assert!(matches!(bucket.get("gb.v2.png").await, ObjectLookup::Found(_)));
        // Only whole dot-only keys are rejected; a dot-prefixed name is an ordinary file
        assert!(matches!(bucket.get("..png").await, ObjectLookup::Found(_)));
        assert!(matches!(
            bucket.get("...").await,
            ObjectLookup::Failed(StorageError::InvalidKey(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_root_that_is_a_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let bucket = FsBucket::new(file.path());
        // Opening "<file>/fr.png" yields ENOTDIR, which is a backend error
        assert!(matches!(
            bucket.get("fr.png").await,
            ObjectLookup::Failed(StorageError::Io(_))
        ));
    }
}
