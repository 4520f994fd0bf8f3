//! Common test utilities and helpers
//!
//! Builds the full router over in-memory stores and a temporary image
//! directory, and provides request helpers for the REST surface.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use postfeed::backend::routes::create_router;
use postfeed::backend::server::{build_state, AppState};
use postfeed::backend::store::{MemoryPostStore, MemoryUserStore};
use postfeed::shared::config::AppConfig;

pub const TEST_SECRET: &str = "test-secret";
pub const PASSWORD: &str = "password123";
pub const BOUNDARY: &str = "postfeed-test-boundary";

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// A running application over memory stores
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub images: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_page_size(2).await
    }

    pub async fn with_page_size(page_size: u32) -> Self {
        let images = tempfile::tempdir().unwrap();
        let config = AppConfig::builder()
            .jwt_secret(TEST_SECRET)
            .page_size(page_size)
            .token_ttl(Duration::from_secs(3600))
            .bcrypt_cost(4)
            .images_dir(images.path())
            .build()
            .unwrap();

        let state = build_state(
            config,
            Arc::new(MemoryPostStore::new()),
            Arc::new(MemoryUserStore::new()),
        );
        let router = create_router(state.clone());

        Self { router, state, images }
    }

    /// Send a request and return the status with the JSON body
    ///
    /// Non-JSON bodies come back as a JSON string.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::post(uri).header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authentication", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::get(uri);
        if let Some(token) = token {
            builder = builder.header("Authentication", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::delete(uri);
        if let Some(token) = token {
            builder = builder.header("Authentication", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Send a multipart form with the given method
    pub async fn multipart(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        form: MultipartForm,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY));
        if let Some(token) = token {
            builder = builder.header("Authentication", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(form.finish())).unwrap()).await
    }

    /// Sign up a user and log in, returning `(token, user_id)`
    pub async fn register(&self, email: &str, name: &str) -> (String, String) {
        let (status, body) = self
            .post_json(
                "/auth/signup",
                None,
                serde_json::json!({ "email": email, "name": name, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

        let (status, body) = self
            .post_json(
                "/auth/login",
                None,
                serde_json::json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        (
            body["token"].as_str().unwrap().to_string(),
            body["userId"].as_str().unwrap().to_string(),
        )
    }

    /// Create a post with a PNG image and return its JSON
    pub async fn create_post(&self, token: &str, title: &str, content: &str) -> Value {
        let form = MultipartForm::new()
            .text("title", title)
            .text("content", content)
            .file("image", "photo.png", "image/png", b"\x89PNG data");
        let (status, body) = self.multipart("POST", "/feed/post", Some(token), form).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["post"].clone()
    }

    pub fn image_path(&self, image_url: &str) -> std::path::PathBuf {
        self.images.path().join(image_url.trim_start_matches("images/"))
    }
}

/// Hand-built multipart/form-data body
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }
}

/// Wait until `check` holds, polling for up to half a second
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..50 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
