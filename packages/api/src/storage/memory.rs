use super::{BlobArea, BlobStore};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory blob store, substitutable for the filesystem one in tests.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<(BlobArea, String), Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, area: BlobArea) -> usize {
        self.blobs
            .read()
            .await
            .keys()
            .filter(|(a, _)| *a == area)
            .count()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, area: BlobArea, filename: &str, data: Vec<u8>) -> Result<()> {
        self.blobs
            .write()
            .await
            .insert((area, filename.to_string()), data);
        Ok(())
    }

    async fn read(&self, area: BlobArea, filename: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .blobs
            .read()
            .await
            .get(&(area, filename.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_read_and_count() {
        let store = InMemoryBlobStore::new();
        store
            .put(BlobArea::Uploads, "a.png", b"bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(
            store.read(BlobArea::Uploads, "a.png").await.unwrap(),
            Some(b"bytes".to_vec())
        );
        assert_eq!(store.len(BlobArea::Uploads).await, 1);
        assert_eq!(store.len(BlobArea::Outputs).await, 0);
    }
}
