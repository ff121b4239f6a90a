mod common;

use axum::http::StatusCode;

use common::{login, multipart_request, send, test_app};

#[tokio::test]
async fn test_small_image_is_hosted() {
    let app = test_app();
    let token = login(&app.router).await;
    let req = multipart_request("/api/upload?folder=rooms", &token, "suite.PNG", "image/png", &[0x89, b'P', b'N', b'G']);
    let resp = send(&app.router, req).await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);

    let url = resp.body["url"].as_str().unwrap();
    let public_id = resp.body["publicId"].as_str().unwrap();
    assert!(public_id.starts_with("rooms/") && public_id.ends_with(".png"));
    assert_eq!(url, format!("http://images.test/hotel-images/{public_id}"));

    let stored = app.image_host.stored.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].1, 4);
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let app = test_app();
    let token = login(&app.router).await;
    let content = vec![0u8; 15 * 1024 * 1024];
    let resp = send(&app.router, multipart_request("/api/upload", &token, "huge.jpg", "image/jpeg", &content)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "File too large. Maximum size is 10MB");
    assert!(app.image_host.stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_image_is_rejected() {
    let app = test_app();
    let token = login(&app.router).await;
    let resp = send(&app.router, multipart_request("/api/upload", &token, "notes.txt", "text/plain", b"hello")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "Only image files are allowed");
}

#[tokio::test]
async fn test_missing_file_is_rejected() {
    let app = test_app();
    let token = login(&app.router).await;
    let resp = send(&app.router, multipart_request("/api/upload", &token, "empty.jpg", "image/jpeg", b"")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "No file provided");
}

#[tokio::test]
async fn test_upload_requires_admin() {
    let app = test_app();
    let req = multipart_request("/api/upload", "not-a-token", "a.jpg", "image/jpeg", b"jpeg");
    assert_eq!(send(&app.router, req).await.status, StatusCode::UNAUTHORIZED);
}
