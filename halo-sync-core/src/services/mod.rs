//! Business logic service layer

mod catalog;
mod config_store;
mod publish_service;
mod sync_service;

pub use catalog::RemoteCatalog;
pub use config_store::ConfigStore;
pub use publish_service::PublishController;
pub use sync_service::SyncEngine;

use std::sync::Arc;

use crate::traits::{ApiClientFactory, ConfigWatcher, PostPicker, Workspace};

/// Service context - holds all dependencies
///
/// Built once by the platform layer, which injects its own workspace,
/// watcher and picker, then shared by `Arc` with every service.
pub struct SyncContext {
    /// File surface posts are pulled into
    pub workspace: Arc<dyn Workspace>,
    /// Selection UI for the catalog picker
    pub picker: Arc<dyn PostPicker>,
    /// Owner of the loaded config
    pub config_store: Arc<ConfigStore>,
    /// Owner of the post cache and the API client
    pub catalog: Arc<RemoteCatalog>,
}

impl SyncContext {
    /// Create the service context
    #[must_use]
    pub fn new(
        workspace: Arc<dyn Workspace>,
        config_watcher: Arc<dyn ConfigWatcher>,
        picker: Arc<dyn PostPicker>,
        api_factory: Arc<dyn ApiClientFactory>,
    ) -> Self {
        let config_store = Arc::new(ConfigStore::new(workspace.clone(), config_watcher));
        let catalog = Arc::new(RemoteCatalog::new(config_store.clone(), api_factory));
        Self {
            workspace,
            picker,
            config_store,
            catalog,
        }
    }

    /// Drop the loaded config, the API client bound to it and the cache.
    pub async fn reset(&self) {
        self.config_store.reset().await;
        self.catalog.clear().await;
    }
}
