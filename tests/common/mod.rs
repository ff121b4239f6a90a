#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt; // for .oneshot()

use hotel_backend::app::app::{create_router, AppServices};
use hotel_backend::config::{AdminUserConfig, JwtConfig};
use hotel_backend::repository::memory_store::InMemoryDocumentStore;
use hotel_backend::service::auth_service::AuthServiceImpl;
use hotel_backend::util::jwt::JwtTokenUtilsImpl;
use hotel_backend::util::minio::{public_link, ImageHost, MinioError};

pub const ADMIN_EMAIL: &str = "admin@hotel.com";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";
pub const UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Records uploads in memory instead of talking to MinIO.
#[derive(Default)]
pub struct FakeImageHost {
    pub stored: Mutex<Vec<(String, usize, String)>>,
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn store_image(&self, object_name: &str, data: Vec<u8>, content_type: &str) -> Result<String, MinioError> {
        self.stored
            .lock()
            .unwrap()
            .push((object_name.to_string(), data.len(), content_type.to_string()));
        Ok(public_link("http://images.test", "hotel-images", object_name))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryDocumentStore>,
    pub image_host: Arc<FakeImageHost>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(InMemoryDocumentStore::new());
    let image_host = Arc::new(FakeImageHost::default());
    let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));
    let admin = AdminUserConfig { email: ADMIN_EMAIL.to_string(), password: ADMIN_PASSWORD.to_string() };
    let auth_service = Arc::new(AuthServiceImpl::new(&admin, jwt_utils.clone()).unwrap());

    let services = AppServices::new(store.clone(), image_host.clone(), UPLOAD_MAX_BYTES, auth_service);
    let router = create_router(&services, None);
    TestApp { router, store, image_host, jwt_utils }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let resp = router.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    TestResponse { status, body }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(router: &Router, uri: &str, token: Option<&str>) -> TestResponse {
    send(router, json_request("GET", uri, token, None)).await
}

pub async fn post(router: &Router, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
    send(router, json_request("POST", uri, token, Some(body))).await
}

pub async fn put(router: &Router, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
    send(router, json_request("PUT", uri, token, Some(body))).await
}

pub async fn delete(router: &Router, uri: &str, token: Option<&str>) -> TestResponse {
    send(router, json_request("DELETE", uri, token, None)).await
}

/// Logs in as the configured admin and returns the access token.
pub async fn login(router: &Router) -> String {
    let resp = post(
        router,
        "/api/auth/login",
        None,
        serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK, "login failed: {}", resp.body);
    resp.body["tokens"]["access_token"].as_str().expect("access_token missing").to_string()
}

/// Multipart body with a single `file` part.
pub fn multipart_request(uri: &str, token: &str, filename: &str, content_type: &str, content: &[u8]) -> Request<Body> {
    let boundary = "hotel-test-boundary";
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", format!("multipart/form-data; boundary={}", boundary))
        .body(Body::from(body))
        .unwrap()
}
