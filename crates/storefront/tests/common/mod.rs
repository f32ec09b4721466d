//! Shared helpers for storefront HTTP tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header::CONTENT_TYPE};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use trailhead_storefront::config::StorefrontConfig;
use trailhead_storefront::state::AppState;

/// A router backed by a pre-order file in a private temp directory.
pub struct TestApp {
    pub router: Router,
    pub preorders_path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Build the full application router with the built-in catalog.
    pub async fn new() -> Self {
        Self::build(None).await
    }

    /// Build the router over a pre-order file that already holds `contents`.
    pub async fn with_preorders_file(contents: &str) -> Self {
        Self::build(Some(contents)).await
    }

    async fn build(contents: Option<&str>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let preorders_path = dir.path().join("data").join("preorders.json");
        if let Some(contents) = contents {
            std::fs::create_dir_all(preorders_path.parent().unwrap()).unwrap();
            std::fs::write(&preorders_path, contents).unwrap();
        }
        let config = StorefrontConfig {
            preorders_path: preorders_path.clone(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            ..StorefrontConfig::default()
        };

        let state = AppState::new(config).await.unwrap();

        Self {
            router: trailhead_storefront::app(state),
            preorders_path,
            _dir: dir,
        }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// The persisted collection as raw JSON (empty when the file is absent).
    pub fn stored(&self) -> Vec<Value> {
        read_collection(&self.preorders_path)
    }
}

pub fn read_collection(path: &Path) -> Vec<Value> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap(),
        Err(_) => Vec::new(),
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
