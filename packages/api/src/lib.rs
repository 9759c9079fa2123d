//! This crate contains all shared fullstack server functions.
use dioxus::prelude::*;

pub mod config;
pub mod types;

#[cfg(feature = "server")]
pub mod relay;

#[cfg(feature = "server")]
pub mod state;

#[cfg(feature = "server")]
pub mod storage;

#[cfg(feature = "server")]
pub mod synthesis;


#[cfg(test)]
mod types_tests;

#[cfg(feature = "server")]
pub mod test_utils;

/// Health check endpoint
#[get("/api/health")]
pub async fn health_check() -> Result<String, ServerFnError> {
    #[cfg(feature = "server")]
    tracing::debug!("health_check");
    Ok("OK".to_string())
}

/// Upload limits the client enforces before sending any bytes.
#[get("/api/config")]
pub async fn upload_policy() -> Result<types::UploadPolicy, ServerFnError> {
    #[cfg(feature = "server")]
    tracing::debug!("upload_policy");
    Ok(types::UploadPolicy {
        max_bytes: types::MAX_UPLOAD_BYTES,
        accepted_types: types::ImageType::ALL
            .iter()
            .map(|t| t.as_mime().to_string())
            .collect(),
    })
}
