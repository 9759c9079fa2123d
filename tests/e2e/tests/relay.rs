use e2e::test_server::TestServer;
use serde_json::{json, Value};

fn png_payload() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 13, 10, 26, 10];
    bytes.extend(std::iter::repeat(0xAB).take(4096));
    bytes
}

#[tokio::test]
async fn uploaded_bytes_come_back_identical() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = reqwest::Client::new();
    let payload = png_payload();

    let part = reqwest::multipart::Part::bytes(payload.clone())
        .file_name("photo.png")
        .mime_str("image/png")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = client
        .post(format!("{}/api/upload", server.url()))
        .multipart(form)
        .send()
        .await
        .expect("upload request failed");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let upload_url = body["uploadUrl"].as_str().expect("uploadUrl present");
    assert!(upload_url.contains("/uploads/"), "got {upload_url}");
    assert!(upload_url.ends_with(".png"), "got {upload_url}");

    let served = client.get(upload_url).send().await.unwrap();
    assert_eq!(served.status(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), payload.as_slice());
}

#[tokio::test]
async fn gif_uploads_are_rejected_and_nothing_is_written() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = reqwest::Client::new();

    let part = reqwest::multipart::Part::bytes(b"GIF89a".to_vec())
        .file_name("anim.gif")
        .mime_str("image/gif")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = client
        .post(format!("{}/api/upload", server.url()))
        .multipart(form)
        .send()
        .await
        .expect("upload request failed");

    assert_eq!(response.status(), 400);
    assert_eq!(server.uploads_on_disk(), 0);
}

#[tokio::test]
async fn fit_without_both_urls_is_rejected() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/fit", server.url()))
        .json(&json!({ "userUrl": "http://h/uploads/a.png" }))
        .send()
        .await
        .expect("fit request failed");

    assert_eq!(response.status(), 400);
}
