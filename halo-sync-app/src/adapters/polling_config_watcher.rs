//! Polling `ConfigWatcher`

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use halo_sync_core::error::CoreResult;
use halo_sync_core::traits::ConfigWatcher;
use halo_sync_core::types::ConfigChangeEvent;

use super::file_stamp::FileStamp;

/// Watches the config file by polling its modification time and length.
///
/// Each `watch` call spawns a task that reports the first change on the
/// channel and then stops; the store registers again after it reloads.
/// Tasks still running are aborted when the watcher is dropped.
pub struct PollingConfigWatcher {
    interval: Duration,
    tx: mpsc::UnboundedSender<ConfigChangeEvent>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl PollingConfigWatcher {
    /// Create a watcher and the receiving end of its notifications.
    #[must_use]
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<ConfigChangeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                interval,
                tx,
                tasks: Mutex::new(Vec::new()),
            },
            rx,
        )
    }
}

async fn watch_once(
    path: PathBuf,
    interval: Duration,
    tx: mpsc::UnboundedSender<ConfigChangeEvent>,
) {
    let initial = FileStamp::of(&path).await;
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if FileStamp::of(&path).await != initial {
            log::debug!("Change detected on {}", path.display());
            // Receiver gone means nobody is interested any more.
            let _ = tx.send(ConfigChangeEvent { path });
            return;
        }
    }
}

#[async_trait]
impl ConfigWatcher for PollingConfigWatcher {
    async fn watch(&self, path: &Path) -> CoreResult<()> {
        let handle = tokio::spawn(watch_once(
            path.to_path_buf(),
            self.interval,
            self.tx.clone(),
        ));

        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|task| !task.is_finished());
            tasks.push(handle);
        }
        log::debug!("Watching {}", path.display());
        Ok(())
    }
}

impl Drop for PollingConfigWatcher {
    fn drop(&mut self) {
        if let Ok(tasks) = self.tasks.get_mut() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}
