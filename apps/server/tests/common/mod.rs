//! Shared helpers for server integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use entities::{NewUser, User, UserPatch};
use serde_json::Value;
use tower::ServiceExt;
use user_store::{MemoryStore, StoreError, StoreResult, UserStore};
use userdir_server::{create_app, AppState, ServerConfig};

/// Builds the app around the given store.
pub fn app_with_store(store: Arc<dyn UserStore>) -> Router {
    create_app(AppState::with_store(store, ServerConfig::default()))
}

/// Builds the app around an empty in-memory store.
pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (app_with_store(store.clone()), store)
}

/// Builds the app around an in-memory store holding John (1) and Jane (2).
pub async fn seeded_app() -> (Router, Arc<MemoryStore>) {
    let (app, store) = memory_app();
    store
        .create(NewUser::new("John", "Doe", "john@example.com"))
        .await
        .unwrap();
    store
        .create(
            NewUser::new("Jane", "Smith", "jane@example.com")
                .with_role(entities::UserRole::Admin),
        )
        .await
        .unwrap();
    (app, store)
}

/// Sends a request and returns the status with the decoded JSON body.
///
/// An empty body decodes to `Value::Null`.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

/// Sends a prepared request and returns the status with the decoded JSON body.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

/// Store whose every operation fails with an unexpected fault.
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        Err(StoreError::Other("Database error".to_string()))
    }

    async fn get(&self, _id: u64) -> StoreResult<Option<User>> {
        Err(StoreError::Other("Database error".to_string()))
    }

    async fn create(&self, _new: NewUser) -> StoreResult<User> {
        Err(StoreError::IdSpaceExhausted)
    }

    async fn update(&self, _id: u64, _patch: UserPatch) -> StoreResult<Option<User>> {
        Err(StoreError::Other("Database error".to_string()))
    }

    async fn delete(&self, _id: u64) -> StoreResult<bool> {
        Err(StoreError::Other("Database error".to_string()))
    }
}

/// Store that panics on list, for the panic-to-500 mapping.
pub struct PanickingStore;

#[async_trait]
impl UserStore for PanickingStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        panic!("store invariant broken");
    }

    async fn get(&self, _id: u64) -> StoreResult<Option<User>> {
        Ok(None)
    }

    async fn create(&self, _new: NewUser) -> StoreResult<User> {
        Err(StoreError::Other("unused".to_string()))
    }

    async fn update(&self, _id: u64, _patch: UserPatch) -> StoreResult<Option<User>> {
        Ok(None)
    }

    async fn delete(&self, _id: u64) -> StoreResult<bool> {
        Ok(false)
    }
}
