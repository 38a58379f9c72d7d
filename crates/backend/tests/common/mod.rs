#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use backend::{api, common::AppState, db::Repository};

/// A router over a scratch backing file that lives as long as the fixture.
pub struct TestApp {
    pub router: Router,
    pub data_file: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn with_records(records: Value) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("pictures.json");
        std::fs::write(&data_file, records.to_string()).unwrap();
        let repo = Repository::load(&data_file).unwrap();

        Self {
            router: api::router(AppState::new(repo)),
            data_file,
            _dir: dir,
        }
    }

    pub fn empty() -> Self {
        Self::with_records(Value::Array(vec![]))
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Vec<u8>) {
        self.send(json_request("POST", uri, body.to_string())).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> (StatusCode, Vec<u8>) {
        self.send(json_request("PUT", uri, body.to_string())).await
    }

    pub async fn count(&self) -> u64 {
        let (status, body) = self.get("/count").await;
        assert_eq!(status, StatusCode::OK);
        json(&body)["length"].as_u64().unwrap()
    }

    /// What a restarted process would load.
    pub fn reload(&self) -> Value {
        let raw = std::fs::read(&self.data_file).unwrap();
        serde_json::from_slice(&raw).unwrap()
    }
}

pub fn json_request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}
