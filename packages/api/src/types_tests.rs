#![cfg(test)]

use crate::types::{ImageType, TryOnResponse, UploadPolicy, UploadReceipt, MAX_UPLOAD_BYTES};
use serde_json::json;

#[test]
fn upload_receipt_uses_camel_case_on_the_wire() {
    let receipt = UploadReceipt {
        upload_url: "http://localhost:4000/uploads/1-2.png".to_string(),
    };
    let value = serde_json::to_value(&receipt).unwrap();
    assert_eq!(
        value,
        json!({ "uploadUrl": "http://localhost:4000/uploads/1-2.png" })
    );
}

#[test]
fn try_on_response_round_trips() {
    let raw = json!({ "resultUrl": "http://localhost:4000/outputs/x.png" });
    let parsed: TryOnResponse = serde_json::from_value(raw).unwrap();
    assert_eq!(parsed.result_url, "http://localhost:4000/outputs/x.png");
}

#[test]
fn upload_policy_reflects_the_cap() {
    let policy = UploadPolicy {
        max_bytes: MAX_UPLOAD_BYTES,
        accepted_types: ImageType::ALL.iter().map(|t| t.as_mime().into()).collect(),
    };
    assert_eq!(policy.max_bytes, 10_485_760);
    assert_eq!(policy.accepted_types.len(), 3);
    let value = serde_json::to_value(&policy).unwrap();
    assert!(value.get("maxBytes").is_some());
    assert!(value.get("acceptedTypes").is_some());
}

#[test]
fn image_type_accepts_the_three_image_mimes_case_insensitively() {
    assert_eq!(ImageType::from_mime("image/jpeg"), Some(ImageType::Jpeg));
    assert_eq!(ImageType::from_mime("IMAGE/JPG"), Some(ImageType::Jpg));
    assert_eq!(ImageType::from_mime("Image/Png"), Some(ImageType::Png));
}

#[test]
fn image_type_rejects_everything_else() {
    assert_eq!(ImageType::from_mime("image/gif"), None);
    assert_eq!(ImageType::from_mime("image/webp"), None);
    assert_eq!(ImageType::from_mime("text/html"), None);
    assert_eq!(ImageType::from_mime(""), None);
}
