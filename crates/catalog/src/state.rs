//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::CatalogConfig;
use crate::services::ImageStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; constructed once at startup and handed to
/// the router, replacing any global database/route singletons.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CatalogConfig,
    pool: SqlitePool,
    uploads: ImageStore,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: CatalogConfig, pool: SqlitePool) -> Self {
        let uploads = ImageStore::new(config.upload_dir.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                uploads,
            }),
        }
    }

    /// Get a reference to the catalog configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the image upload store.
    #[must_use]
    pub fn uploads(&self) -> &ImageStore {
        &self.inner.uploads
    }
}
