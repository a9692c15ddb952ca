//! Application state

use std::sync::Arc;

use user_store::{JsonFileStore, UserStore};

use crate::config::ServerConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// User store
    pub store: Arc<dyn UserStore>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create application state backed by the configured data file
    pub async fn new(config: ServerConfig) -> Self {
        let store = JsonFileStore::open(&config.data_file).await;
        if store.is_degraded() {
            tracing::warn!(
                path = %config.data_file.display(),
                "User store started degraded, changes may not be persisted"
            );
        }

        Self::with_store(Arc::new(store), config)
    }

    /// Create application state around an existing store
    pub fn with_store(store: Arc<dyn UserStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
