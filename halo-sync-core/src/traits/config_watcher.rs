//! Config change subscription

use std::path::Path;

use async_trait::async_trait;

use crate::error::CoreResult;

/// Registers for change notifications on the config file.
///
/// Notifications are delivered back through
/// [`ConfigStore::handle_change`](crate::services::ConfigStore::handle_change)
/// by whoever drives the watcher.
#[async_trait]
pub trait ConfigWatcher: Send + Sync {
    async fn watch(&self, path: &Path) -> CoreResult<()>;
}

/// Watcher that never reports changes.
///
/// For short-lived processes that load the config once and exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopConfigWatcher;

#[async_trait]
impl ConfigWatcher for NoopConfigWatcher {
    async fn watch(&self, path: &Path) -> CoreResult<()> {
        log::debug!("Not watching {}", path.display());
        Ok(())
    }
}
