//! Editor/file surface abstract Trait

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::CoreResult;

/// Workspace Trait
///
/// The file surface the sync engine works against: a root directory of
/// markdown files whose content is edited through buffers.
///
/// Platform implementation:
/// - CLI: `LocalWorkspace` (tokio::fs, buffers flushed on save)
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Workspace root, `None` when no folder is open.
    fn root(&self) -> Option<PathBuf>;

    /// Find files named `file_name` under the root, excluding dependency,
    /// build and hidden directories.
    async fn find_files(&self, file_name: &str) -> CoreResult<Vec<PathBuf>>;

    /// Current text of a document (unsaved buffer content included).
    async fn read_text(&self, path: &Path) -> CoreResult<String>;

    /// Create an empty file.
    ///
    /// Returns `false` without touching anything when the file already exists.
    async fn create_file(&self, path: &Path) -> CoreResult<bool>;

    /// Replace the whole buffer of a document.
    async fn replace_content(&self, path: &Path, text: &str) -> CoreResult<()>;

    /// Persist the buffer of a document.
    async fn save(&self, path: &Path) -> CoreResult<()>;
}
