//! Client for the external image-synthesis service.
//!
//! One POST per try-on, no retry; the caller owns any retry policy.

use crate::config::SynthesisConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessRequest {
    user_path: String,
    cloth_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessResponse {
    result_url: String,
}

/// How a synthesis attempt failed. Feeds the gateway's 500 `details` payload,
/// keeping "upstream answered with an error body" distinguishable from
/// transport failures.
#[derive(Debug)]
pub enum SynthesisFailure {
    Upstream { status: u16, body: Value },
    Other(String),
}

impl std::fmt::Display for SynthesisFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisFailure::Upstream { status, .. } => {
                write!(f, "synthesis service returned status {status}")
            }
            SynthesisFailure::Other(msg) => write!(f, "{msg}"),
        }
    }
}

/// Forward both uploaded files to the synthesis service and return the
/// filename component of its result reference.
pub async fn run(
    http: &reqwest::Client,
    config: &SynthesisConfig,
    user_file: &str,
    cloth_file: &str,
) -> Result<String, SynthesisFailure> {
    let request = ProcessRequest {
        user_path: map_input_path(&config.input_dir, user_file),
        cloth_path: map_input_path(&config.input_dir, cloth_file),
    };
    tracing::debug!(
        user = %request.user_path,
        cloth = %request.cloth_path,
        "synthesis.run: forwarding"
    );

    let response = http
        .post(&config.endpoint)
        .timeout(config.timeout)
        .json(&request)
        .send()
        .await
        .map_err(|e| SynthesisFailure::Other(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        tracing::warn!(status = status.as_u16(), "synthesis.run: upstream error");
        return Err(SynthesisFailure::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: ProcessResponse = response
        .json()
        .await
        .map_err(|e| SynthesisFailure::Other(format!("malformed synthesis response: {e}")))?;

    Ok(basename(&parsed.result_url).to_string())
}

/// Map an uploaded filename to the absolute path the synthesis service
/// expects. The directory comes from configuration, not from this binary's
/// own storage layout.
fn map_input_path(input_dir: &str, filename: &str) -> String {
    Path::new(input_dir).join(filename).to_string_lossy().into_owned()
}

/// Final path component of a URL or path.
pub fn basename(reference: &str) -> &str {
    reference
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_takes_the_final_component() {
        assert_eq!(basename("http://internal:5000/out/x.png"), "x.png");
        assert_eq!(basename("/srv/outputs/y.jpg"), "y.jpg");
        assert_eq!(basename("plain.png"), "plain.png");
        assert_eq!(basename(r"c:\outputs\z.png"), "z.png");
    }

    #[test]
    fn input_paths_join_under_the_configured_dir() {
        assert_eq!(
            map_input_path("/srv/fitroom/uploads", "1-2.png"),
            "/srv/fitroom/uploads/1-2.png"
        );
    }

    #[test]
    fn process_request_uses_the_upstream_key_spelling() {
        let request = ProcessRequest {
            user_path: "/a/u.png".into(),
            cloth_path: "/a/c.png".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("userPath").is_some());
        assert!(value.get("clothPath").is_some());
    }
}
