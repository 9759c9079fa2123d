//! HTTP relay surface: upload ingress, synthesis gateway, and the two
//! read-only static mounts over the blob store.

use crate::config::AppConfig;
use crate::state::AppState;
use crate::storage::{generate_filename, BlobArea};
use crate::synthesis::{self, SynthesisFailure};
use crate::types::{ImageType, TryOnResponse, UploadReceipt, MAX_UPLOAD_BYTES};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::services::ServeDir;

/// Slack above the upload cap so the handler performs the oversize
/// rejection, not the framework body limit.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("no file field in request")]
    MissingFile,
    #[error("unsupported content type '{0}'")]
    UnsupportedType(String),
    #[error("file exceeds {MAX_UPLOAD_BYTES} bytes")]
    TooLarge,
    #[error("malformed request body")]
    BadBody,
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("invalid filename in '{0}'")]
    BadFilename(String),
    #[error("failed to store upload")]
    Persistence(#[source] anyhow::Error),
    #[error("synthesis failed")]
    Synthesis(SynthesisFailure),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            RelayError::MissingFile
            | RelayError::UnsupportedType(_)
            | RelayError::TooLarge
            | RelayError::BadBody
            | RelayError::MissingField(_)
            | RelayError::BadFilename(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            RelayError::Persistence(source) => {
                tracing::error!(error = %source, "relay: persistence failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
            RelayError::Synthesis(failure) => {
                let details = match failure {
                    SynthesisFailure::Upstream { body, .. } => body.clone(),
                    SynthesisFailure::Other(msg) => Value::String(msg.clone()),
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string(), "details": details }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Build the relay router. Handlers resolve services through the global
/// [`AppState`]; only the static mounts need the directories up front.
pub fn router(config: &AppConfig) -> Router {
    Router::new()
        .route("/api/upload", post(upload))
        .route("/api/fit", post(fit))
        .layer(DefaultBodyLimit::max(
            MAX_UPLOAD_BYTES as usize + BODY_LIMIT_SLACK,
        ))
        .nest_service(
            "/uploads",
            ServeDir::new(&config.storage.uploads_dir),
        )
        .nest_service(
            "/outputs",
            ServeDir::new(&config.storage.outputs_dir),
        )
}

/// `POST /api/upload` — accept one image, persist it, return its public URL.
///
/// Type and size are checked before any byte reaches the blob store. Upload
/// never triggers synthesis; that is a separate call to `/api/fit`.
async fn upload(
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>, RelayError> {
    let state = AppState::global();

    let mut accepted = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| RelayError::BadBody)?
    {
        if field.name() != Some("file") {
            continue;
        }

        let declared = field.content_type().unwrap_or_default().to_string();
        if ImageType::from_mime(&declared).is_none() {
            return Err(RelayError::UnsupportedType(declared));
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|_| RelayError::TooLarge)?;
        if data.len() as u64 > MAX_UPLOAD_BYTES {
            return Err(RelayError::TooLarge);
        }

        accepted = Some((generate_filename(&original_name), data.to_vec()));
        break;
    }

    let (filename, data) = accepted.ok_or(RelayError::MissingFile)?;
    let size = data.len();
    state
        .storage
        .put(BlobArea::Uploads, &filename, data)
        .await
        .map_err(RelayError::Persistence)?;

    tracing::info!(file = %filename, bytes = size, "upload accepted");
    Ok(Json(UploadReceipt {
        upload_url: format!(
            "{}/uploads/{filename}",
            request_base(&headers, &state.config)
        ),
    }))
}

/// Body of `POST /api/fit`. Fields are optional here so that an absent key
/// surfaces as a 400 instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FitBody {
    user_url: Option<String>,
    cloth_url: Option<String>,
}

/// `POST /api/fit` — forward two uploaded images to the synthesis service
/// and hand back its result rewritten under this server's `/outputs` mount.
async fn fit(
    headers: HeaderMap,
    payload: Result<Json<FitBody>, JsonRejection>,
) -> Result<Json<TryOnResponse>, RelayError> {
    let Json(body) = payload.map_err(|_| RelayError::BadBody)?;
    let user_url = require(body.user_url, "userUrl")?;
    let cloth_url = require(body.cloth_url, "clothUrl")?;

    let user_file = checked_basename(&user_url)?;
    let cloth_file = checked_basename(&cloth_url)?;

    let state = AppState::global();
    let result_file =
        synthesis::run(&state.http, &state.config.synthesis, user_file, cloth_file)
            .await
            .map_err(RelayError::Synthesis)?;

    tracing::info!(result = %result_file, "fit completed");
    Ok(Json(TryOnResponse {
        result_url: format!(
            "{}/outputs/{result_file}",
            request_base(&headers, &state.config)
        ),
    }))
}

fn require(value: Option<String>, name: &'static str) -> Result<String, RelayError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RelayError::MissingField(name)),
    }
}

/// Filename component of an upload URL, with query/fragment stripped.
/// Names that would escape the blob directory are rejected outright.
fn checked_basename(url: &str) -> Result<&str, RelayError> {
    let name = synthesis::basename(url);
    let name = name.split(['?', '#']).next().unwrap_or(name);
    if name.is_empty() || name == "." || name == ".." {
        return Err(RelayError::BadFilename(url.to_string()));
    }
    Ok(name)
}

/// Base for client-facing URLs: the configured public base if set, else the
/// request's Host header.
fn request_base(headers: &HeaderMap, config: &AppConfig) -> String {
    if let Some(base) = &config.public_base_url {
        return base.trim_end_matches('/').to_string();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost:8080");
    format!("http://{host}")
}
