use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;

pub mod filesystem;
pub mod memory;

/// The two sub-areas of the blob store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobArea {
    Uploads,
    Outputs,
}

impl BlobArea {
    /// Directory name on disk and route segment, identical by convention.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlobArea::Uploads => "uploads",
            BlobArea::Outputs => "outputs",
        }
    }
}

/// Trait for blob store implementations
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, area: BlobArea, filename: &str, data: Vec<u8>) -> Result<()>;
    async fn read(&self, area: BlobArea, filename: &str) -> Result<Option<Vec<u8>>>;
}

/// Generate a storage filename: `{millisecond timestamp}-{random in [0, 1e9)}`
/// plus the original file's extension.
///
/// Best-effort uniqueness only: two writes in the same millisecond with the
/// same draw collide. Accepted limitation for this workload.
pub fn generate_filename(original_name: &str) -> String {
    let ts = chrono::Utc::now().timestamp_millis();
    let draw: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    match std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) if !ext.is_empty() => format!("{ts}-{draw}.{ext}"),
        _ => format!("{ts}-{draw}"),
    }
}
