//! Router fixtures shared by the handler tests.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::Config;
use crate::models::MappingRecord;
use crate::routes;
use crate::state::AppState;
use crate::store::{MemoryStore, UrlStore};

pub const TEST_BASE_URL: &str = "https://39ulo8a9se.execute-api.us-east-1.amazonaws.com/Prod";

/// Store whose every call fails, standing in for an unreachable backend
pub struct FailingStore;

#[async_trait]
impl UrlStore for FailingStore {
    async fn put(&self, _record: &MappingRecord) -> Result<()> {
        Err(anyhow!("connection refused: spanner.internal:443"))
    }

    async fn get(&self, _short_code: &str) -> Result<Option<String>> {
        Err(anyhow!("connection refused: spanner.internal:443"))
    }

    async fn health_check(&self) -> Result<()> {
        Err(anyhow!("connection refused: spanner.internal:443"))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "STORE_BACKEND" => Some("memory".to_string()),
        "BASE_URL" => Some(TEST_BASE_URL.to_string()),
        _ => None,
    })
    .expect("memory config is valid")
}

pub fn app_with_store(store: Arc<dyn UrlStore>) -> Router {
    routes::router(AppState {
        store,
        config: Arc::new(test_config()),
    })
}

/// Router over a fresh in-memory store, plus a handle on that store
pub fn memory_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    (app_with_store(Arc::new(store.clone())), store)
}

pub fn failing_app() -> Router {
    app_with_store(Arc::new(FailingStore))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Body) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
