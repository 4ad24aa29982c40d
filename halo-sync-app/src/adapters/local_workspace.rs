//! Local filesystem `Workspace`

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use walkdir::{DirEntry, WalkDir};

use halo_sync_core::error::{CoreError, CoreResult};
use halo_sync_core::traits::Workspace;

/// Directory names never descended into when searching.
const SKIPPED_DIRS: &[&str] = &["node_modules", "target"];

/// SHA-256 of `text`, hex encoded.
#[must_use]
pub fn fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

fn io_error(path: &Path, e: &std::io::Error) -> CoreError {
    CoreError::WorkspaceError(format!("{}: {e}", path.display()))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

/// Every file named `file_name` below `root`, sorted.
///
/// Entries that cannot be read are left out of the result.
fn search(root: &Path, file_name: &str) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
        .filter_map(Result::ok)
        .filter(|entry| !entry.file_type().is_dir() && entry.file_name() == file_name)
        .map(DirEntry::into_path)
        .collect();
    found.sort();
    found
}

/// A directory on the local disk.
///
/// Replaced content stays in memory until [`save`](Workspace::save) writes
/// it out. Every save is fingerprinted so a later observer can tell this
/// workspace's own writes apart from edits made by the user. A fingerprint
/// answers for one observation only.
pub struct LocalWorkspace {
    root: Option<PathBuf>,
    buffers: RwLock<HashMap<PathBuf, String>>,
    own_saves: RwLock<HashMap<PathBuf, String>>,
}

impl LocalWorkspace {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            buffers: RwLock::new(HashMap::new()),
            own_saves: RwLock::new(HashMap::new()),
        }
    }

    /// A workspace with no folder open.
    #[must_use]
    pub fn without_root() -> Self {
        Self {
            root: None,
            buffers: RwLock::new(HashMap::new()),
            own_saves: RwLock::new(HashMap::new()),
        }
    }

    /// Whether `text` is exactly what this workspace last saved to `path`.
    ///
    /// The pending fingerprint for `path` is consumed either way, so content
    /// the user later writes back byte for byte counts as their own save.
    pub async fn claim_own_save(&self, path: &Path, text: &str) -> bool {
        self.own_saves
            .write()
            .await
            .remove(path)
            .is_some_and(|saved| saved == fingerprint(text))
    }

    /// Whether `path` has replaced content that was not saved yet.
    pub async fn is_dirty(&self, path: &Path) -> bool {
        self.buffers.read().await.contains_key(path)
    }
}

#[async_trait]
impl Workspace for LocalWorkspace {
    fn root(&self) -> Option<PathBuf> {
        self.root.clone()
    }

    async fn find_files(&self, file_name: &str) -> CoreResult<Vec<PathBuf>> {
        let Some(root) = self.root.clone() else {
            return Ok(Vec::new());
        };

        let target = file_name.to_string();
        let found = tokio::task::spawn_blocking(move || search(&root, &target))
            .await
            .map_err(|e| CoreError::WorkspaceError(format!("File search failed: {e}")))?;
        log::debug!("Found {} file(s) named {file_name}", found.len());
        Ok(found)
    }

    async fn read_text(&self, path: &Path) -> CoreResult<String> {
        if let Some(text) = self.buffers.read().await.get(path) {
            return Ok(text.clone());
        }
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| io_error(path, &e))
    }

    async fn create_file(&self, path: &Path) -> CoreResult<bool> {
        let result = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await;
        match result {
            Ok(_) => {
                log::debug!("Created {}", path.display());
                self.own_saves
                    .write()
                    .await
                    .insert(path.to_path_buf(), fingerprint(""));
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(io_error(path, &e)),
        }
    }

    async fn replace_content(&self, path: &Path, text: &str) -> CoreResult<()> {
        self.buffers
            .write()
            .await
            .insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    async fn save(&self, path: &Path) -> CoreResult<()> {
        let Some(text) = self.buffers.write().await.remove(path) else {
            return Ok(());
        };

        // Fingerprint before writing so a concurrent observer never sees
        // our content without the matching fingerprint.
        self.own_saves
            .write()
            .await
            .insert(path.to_path_buf(), fingerprint(&text));

        tokio::fs::write(path, text.as_bytes())
            .await
            .map_err(|e| io_error(path, &e))
    }
}
