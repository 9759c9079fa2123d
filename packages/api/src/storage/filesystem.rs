use super::{BlobArea, BlobStore};
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Filesystem blob store: one directory per area (local development and
/// single-host deployments).
pub struct FilesystemBlobStore {
    uploads_dir: PathBuf,
    outputs_dir: PathBuf,
}

impl FilesystemBlobStore {
    pub fn new(uploads_dir: &str, outputs_dir: &str) -> Self {
        Self {
            uploads_dir: PathBuf::from(uploads_dir),
            outputs_dir: PathBuf::from(outputs_dir),
        }
    }

    fn dir_for(&self, area: BlobArea) -> &Path {
        match area {
            BlobArea::Uploads => &self.uploads_dir,
            BlobArea::Outputs => &self.outputs_dir,
        }
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(&self, area: BlobArea, filename: &str, data: Vec<u8>) -> Result<()> {
        let file_path = self.dir_for(area).join(filename);

        // Create the area directory if it doesn't exist yet
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&file_path, data).await?;

        tracing::debug!("Stored {}", file_path.display());
        Ok(())
    }

    async fn read(&self, area: BlobArea, filename: &str) -> Result<Option<Vec<u8>>> {
        let file_path = self.dir_for(area).join(filename);

        match fs::read(&file_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
