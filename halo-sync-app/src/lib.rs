//! Application bootstrap for halo-sync.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection) and the local adapters used by the CLI.

pub mod adapters;

use std::sync::Arc;

use halo_sync_core::error::{CoreError, CoreResult};
use halo_sync_core::services::{PublishController, SyncContext, SyncEngine};
use halo_sync_core::traits::{
    ApiClientFactory, ConfigWatcher, HaloApiClientFactory, NoopConfigWatcher, PostPicker,
    Workspace,
};
use halo_sync_core::types::{ConfigChangeEvent, HaloConfig};

/// Application state.
///
/// Holds the services and the `SyncContext` they share. Every frontend
/// constructs this once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (config, catalog and collaborators)
    pub ctx: Arc<SyncContext>,
    /// Pull, push and save handling
    pub sync_engine: SyncEngine,
    /// Publishing
    pub publish_controller: PublishController,
}

impl AppState {
    /// Load the config if needed and return it.
    pub async fn check_config(&self) -> CoreResult<HaloConfig> {
        self.ctx.config_store.get_config().await
    }

    /// Discard the loaded config and everything derived from it, then load again.
    pub async fn reload_config(&self) -> CoreResult<HaloConfig> {
        self.ctx.reset().await;
        self.ctx.config_store.get_config().await
    }

    /// Deliver a config file change from the watcher.
    pub async fn on_config_change(&self, event: ConfigChangeEvent) {
        self.ctx.config_store.handle_change(event).await;
        self.ctx.catalog.clear().await;
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `workspace` — the file surface posts are pulled into
/// - `picker` — selection UI for the catalog picker
///
/// # Optional
/// - `config_watcher` — defaults to `NoopConfigWatcher`
/// - `api_factory` — defaults to `HaloApiClientFactory`
pub struct AppStateBuilder {
    workspace: Option<Arc<dyn Workspace>>,
    config_watcher: Option<Arc<dyn ConfigWatcher>>,
    picker: Option<Arc<dyn PostPicker>>,
    api_factory: Option<Arc<dyn ApiClientFactory>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            workspace: None,
            config_watcher: None,
            picker: None,
            api_factory: None,
        }
    }

    #[must_use]
    pub fn workspace(mut self, workspace: Arc<dyn Workspace>) -> Self {
        self.workspace = Some(workspace);
        self
    }

    #[must_use]
    pub fn config_watcher(mut self, watcher: Arc<dyn ConfigWatcher>) -> Self {
        self.config_watcher = Some(watcher);
        self
    }

    #[must_use]
    pub fn picker(mut self, picker: Arc<dyn PostPicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    #[must_use]
    pub fn api_factory(mut self, factory: Arc<dyn ApiClientFactory>) -> Self {
        self.api_factory = Some(factory);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let workspace = self
            .workspace
            .ok_or_else(|| CoreError::ValidationError("workspace is required".to_string()))?;
        let picker = self
            .picker
            .ok_or_else(|| CoreError::ValidationError("picker is required".to_string()))?;
        let config_watcher = self
            .config_watcher
            .unwrap_or_else(|| Arc::new(NoopConfigWatcher));
        let api_factory = self
            .api_factory
            .unwrap_or_else(|| Arc::new(HaloApiClientFactory));

        let ctx = Arc::new(SyncContext::new(
            workspace,
            config_watcher,
            picker,
            api_factory,
        ));

        Ok(AppState {
            sync_engine: SyncEngine::new(Arc::clone(&ctx)),
            publish_controller: PublishController::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
