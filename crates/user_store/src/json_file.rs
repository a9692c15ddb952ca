//! JSON-file backed user store.
//!
//! The full list lives in memory and is the source of truth for the life of
//! the process. Every mutation rewrites the backing file with the complete
//! list. A failed read or write never reaches the caller: it is logged, the
//! store is marked degraded, and in-memory state carries on.

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use entities::{NewUser, User, UserPatch};
use tokio::{fs, sync::RwLock};
use tracing::{debug, error, info, warn};

use crate::{
    StoreResult, UserStore,
    memory::{find, insert_new, patch_in_place, remove},
};

/// Failure while mirroring the list to disk.
#[derive(Debug, thiserror::Error)]
enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// User store persisted to a single pretty-printed JSON file.
///
/// Mutations hold the write lock while assigning ids and rewriting the file,
/// so concurrent requests against one store are applied one at a time.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    users: RwLock<Vec<User>>,
    degraded: AtomicBool,
}

impl JsonFileStore {
    /// Opens the store backed by `path`.
    ///
    /// A missing file is created, together with its parent directories,
    /// holding an empty list. An unreadable or unparsable file yields an
    /// empty store. Neither case is fatal.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self {
            path: path.into(),
            users: RwLock::new(Vec::new()),
            degraded: AtomicBool::new(false),
        };

        match fs::try_exists(&store.path).await {
            Ok(true) => match load(&store.path).await {
                Ok(users) => {
                    info!(path = %store.path.display(), count = users.len(), "Loaded users");
                    *store.users.write().await = users;
                }
                Err(e) => {
                    error!(
                        path = %store.path.display(),
                        error = %e,
                        "Failed to load users, starting with an empty list"
                    );
                    store.degraded.store(true, Ordering::Relaxed);
                }
            },
            Ok(false) => {
                info!(path = %store.path.display(), "Data file not found, creating it");
                let result = persist(&store.path, &[]).await;
                store.record(result);
            }
            Err(e) => {
                error!(
                    path = %store.path.display(),
                    error = %e,
                    "Failed to stat data file, starting with an empty list"
                );
                store.degraded.store(true, Ordering::Relaxed);
            }
        }

        store
    }

    /// Rewrites the backing file with `users`, recording the outcome.
    async fn sync(&self, users: &[User]) {
        let result = persist(&self.path, users).await;
        self.record(result);
    }

    fn record(&self, result: Result<(), PersistError>) {
        match result {
            Ok(()) => {
                if self.degraded.swap(false, Ordering::Relaxed) {
                    info!(path = %self.path.display(), "Data file writable again");
                }
                debug!(path = %self.path.display(), "Users written");
            }
            Err(e) => {
                self.degraded.store(true, Ordering::Relaxed);
                error!(
                    path = %self.path.display(),
                    error = %e,
                    durable = false,
                    "Failed to write users, in-memory state is ahead of disk"
                );
            }
        }
    }
}

#[async_trait]
impl UserStore for JsonFileStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn get(&self, id: u64) -> StoreResult<Option<User>> {
        Ok(find(&self.users.read().await, id).cloned())
    }

    async fn create(&self, new: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let user = insert_new(&mut users, new)?;
        self.sync(&users).await;
        Ok(user)
    }

    async fn update(&self, id: u64, patch: UserPatch) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        let Some(user) = patch_in_place(&mut users, id, patch) else {
            return Ok(None);
        };
        self.sync(&users).await;
        Ok(Some(user))
    }

    async fn delete(&self, id: u64) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        if !remove(&mut users, id) {
            return Ok(false);
        }
        self.sync(&users).await;
        Ok(true)
    }

    /// True while the last load or write of the backing file has failed.
    fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }
}

async fn load(path: &Path) -> Result<Vec<User>, PersistError> {
    let contents = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

async fn persist(path: &Path, users: &[User]) -> Result<(), PersistError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !fs::try_exists(dir).await? {
            warn!(dir = %dir.display(), "Creating data directory");
            fs::create_dir_all(dir).await?;
        }
    }

    let json = serde_json::to_string_pretty(users)?;
    fs::write(path, json).await?;
    Ok(())
}
