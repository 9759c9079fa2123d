use serde::{Deserialize, Serialize};

/// Upload size cap, enforced server-side before any byte is persisted.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Image content types the upload ingress accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    Jpeg,
    Jpg,
    Png,
}

impl ImageType {
    pub const ALL: [ImageType; 3] = [ImageType::Jpeg, ImageType::Jpg, ImageType::Png];

    pub fn from_mime(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" => Some(ImageType::Jpeg),
            "image/jpg" => Some(ImageType::Jpg),
            "image/png" => Some(ImageType::Png),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Jpg => "image/jpg",
            ImageType::Png => "image/png",
        }
    }
}

/// Returned by `POST /api/upload` once the file is durable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub upload_url: String,
}

/// Returned by `POST /api/fit`; the URL is always under this server's
/// `/outputs` mount, never the synthesis service's own address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnResponse {
    pub result_url: String,
}

/// Upload limits the client checks before sending bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub accepted_types: Vec<String>,
}
