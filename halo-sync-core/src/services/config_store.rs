//! Config lifecycle: discovery, validation, caching and invalidation

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::{ConfigWatcher, Workspace};
use crate::types::{ConfigChangeEvent, HaloConfig, CONFIG_FILE_NAME};

#[derive(Default)]
struct ConfigState {
    config: Option<HaloConfig>,
    path: Option<PathBuf>,
    generation: u64,
}

/// Owns the connection settings every remote call depends on.
///
/// `UNLOADED -> LOADING -> READY`, back to `UNLOADED` on reset or on a change
/// notification. A failed load leaves the store unloaded. Each successful
/// load and each reset bumps the generation, which lets holders of derived
/// state (API clients, catalog) detect that they are stale.
pub struct ConfigStore {
    workspace: Arc<dyn Workspace>,
    watcher: Arc<dyn ConfigWatcher>,
    state: RwLock<ConfigState>,
}

impl ConfigStore {
    #[must_use]
    pub fn new(workspace: Arc<dyn Workspace>, watcher: Arc<dyn ConfigWatcher>) -> Self {
        Self {
            workspace,
            watcher,
            state: RwLock::new(ConfigState::default()),
        }
    }

    /// Return the loaded config, loading it from the workspace when needed.
    pub async fn get_config(&self) -> CoreResult<HaloConfig> {
        self.current().await.map(|(config, _)| config)
    }

    /// Loaded config together with the generation it belongs to.
    pub(crate) async fn current(&self) -> CoreResult<(HaloConfig, u64)> {
        {
            let state = self.state.read().await;
            if let Some(config) = &state.config {
                return Ok((config.clone(), state.generation));
            }
        }
        self.load().await
    }

    /// Discard the loaded config. Safe to call repeatedly.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        if state.config.is_some() {
            log::info!("Config reset");
        }
        state.config = None;
        state.path = None;
        state.generation += 1;
    }

    pub async fn is_ready(&self) -> bool {
        self.state.read().await.config.is_some()
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    /// Path of the loaded config file.
    pub async fn config_path(&self) -> Option<PathBuf> {
        self.state.read().await.path.clone()
    }

    /// Deliver a change notification for the watched config file.
    pub async fn handle_change(&self, event: ConfigChangeEvent) {
        log::info!("Config file changed: {}", event.path.display());
        self.reset().await;
    }

    async fn load(&self) -> CoreResult<(HaloConfig, u64)> {
        let mut candidates = self.workspace.find_files(CONFIG_FILE_NAME).await?;
        if candidates.len() != 1 {
            log::warn!(
                "Expected one {CONFIG_FILE_NAME}, found {}",
                candidates.len()
            );
            return Err(CoreError::ConfigMissing {
                file_name: CONFIG_FILE_NAME.to_string(),
                found: candidates.len(),
            });
        }
        let path = candidates.remove(0);

        let text = self.workspace.read_text(&path).await?;
        let config: HaloConfig =
            serde_json::from_str(&text).map_err(|e| CoreError::ConfigInvalidFormat {
                path: path.display().to_string(),
                detail: e.to_string(),
            })?;

        let missing = config.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::ConfigIncomplete { missing });
        }

        // Concurrent loads are not de-duplicated; the last one wins.
        let (generation, newly_ready) = {
            let mut state = self.state.write().await;
            let newly_ready = state.config.is_none();
            state.config = Some(config.clone());
            state.path = Some(path.clone());
            state.generation += 1;
            (state.generation, newly_ready)
        };
        log::info!("Config loaded from {}: {config:?}", path.display());

        if newly_ready {
            if let Err(e) = self.watcher.watch(&path).await {
                log::warn!("Failed to watch {}: {e}", path.display());
            }
        }

        Ok((config, generation))
    }
}
