//! Markdown save detection for a local workspace

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use halo_sync_core::error::{CoreError, CoreResult};
use halo_sync_core::traits::Workspace;
use halo_sync_core::types::{SaveEvent, SaveReason};

use super::file_stamp::FileStamp;
use super::local_workspace::{fingerprint, LocalWorkspace};

struct Seen {
    stamp: FileStamp,
    fingerprint: String,
}

/// Turns changes to `*.md` files at the workspace root into save events.
///
/// The first change seen after the workspace itself saved a file is
/// reported as [`SaveReason::Programmatic`] when its content matches that
/// save; anything else is a manual save.
/// Touching a file without changing its content reports nothing.
pub struct MarkdownSavePoller {
    workspace: Arc<LocalWorkspace>,
    seen: HashMap<PathBuf, Seen>,
    primed: bool,
}

impl MarkdownSavePoller {
    #[must_use]
    pub fn new(workspace: Arc<LocalWorkspace>) -> Self {
        Self {
            workspace,
            seen: HashMap::new(),
            primed: false,
        }
    }

    /// Record the current state of every markdown file without reporting it.
    pub async fn baseline(&mut self) -> CoreResult<()> {
        self.scan().await.map(|_| ())
    }

    /// Scan once and return the saves found since the previous scan.
    ///
    /// The first scan only records a baseline.
    pub async fn poll(&mut self) -> CoreResult<Vec<SaveEvent>> {
        self.scan().await
    }

    /// Poll forever on `interval`, sending events to `tx`.
    ///
    /// Stops when the receiver is dropped.
    pub fn spawn(mut self, interval: Duration, tx: mpsc::Sender<SaveEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.baseline().await {
                log::warn!("Initial scan failed: {e}");
            }
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let events = match self.poll().await {
                    Ok(events) => events,
                    Err(e) => {
                        log::warn!("Scan failed: {e}");
                        continue;
                    }
                };
                for event in events {
                    if tx.send(event).await.is_err() {
                        return;
                    }
                }
            }
        })
    }

    async fn scan(&mut self) -> CoreResult<Vec<SaveEvent>> {
        let mut events = Vec::new();
        for path in self.markdown_files().await? {
            let Some(stamp) = FileStamp::of(&path).await else {
                continue;
            };
            if self.seen.get(&path).is_some_and(|seen| seen.stamp == stamp) {
                continue;
            }

            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) => {
                    log::debug!("Skipping unreadable {}: {e}", path.display());
                    continue;
                }
            };
            let print = fingerprint(&text);
            let content_changed = self
                .seen
                .get(&path)
                .is_none_or(|seen| seen.fingerprint != print);
            self.seen.insert(
                path.clone(),
                Seen {
                    stamp,
                    fingerprint: print,
                },
            );

            if content_changed && self.primed {
                let reason = if self.workspace.claim_own_save(&path, &text).await {
                    SaveReason::Programmatic
                } else {
                    SaveReason::Manual
                };
                events.push(SaveEvent { path, text, reason });
            }
        }

        self.primed = true;
        Ok(events)
    }

    async fn markdown_files(&self) -> CoreResult<Vec<PathBuf>> {
        let Some(root) = self.workspace.root() else {
            return Err(CoreError::NoWorkspaceOpen);
        };
        list_markdown(&root).await
    }
}

async fn list_markdown(root: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(root)
        .await
        .map_err(|e| CoreError::WorkspaceError(format!("{}: {e}", root.display())))?;

    let mut files = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
        if is_file && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
