//! Save notifications

use std::path::PathBuf;

/// What caused a document to be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveReason {
    /// Saved by the user.
    Manual,
    /// Saved by a tool, including this crate's own pull.
    Programmatic,
    /// Saved by an auto-save timer or focus change.
    Auto,
}

/// A document was saved.
#[derive(Debug, Clone)]
pub struct SaveEvent {
    pub path: PathBuf,
    /// Full text of the document as saved.
    pub text: String,
    pub reason: SaveReason,
}

impl SaveEvent {
    #[must_use]
    pub fn manual(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            reason: SaveReason::Manual,
        }
    }
}
