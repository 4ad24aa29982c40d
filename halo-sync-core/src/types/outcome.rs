//! Results of sync operations
//!
//! Every path that intentionally does nothing returns a `Skipped` variant
//! with its reason, so "ignored" and "failed" stay distinguishable.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use halo_sync_api::Post;

/// Why an operation did nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum SkipReason {
    /// The save was not initiated by the user.
    NotManualSave,
    /// The file is not a `.md` file.
    NotMarkdown,
    /// No remote post carries this title.
    Untracked { title: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotManualSave => f.write_str("not a manual save"),
            Self::NotMarkdown => f.write_str("not a markdown file"),
            Self::Untracked { title } => write!(f, "no remote post titled {title:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum PushOutcome {
    /// Remote content replaced; carries the post returned by the blog.
    Updated(Post),
    Skipped(SkipReason),
}

/// Result of a save notification. Non-manual and non-markdown saves skip.
pub type SaveOutcome = PushOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum PullOutcome {
    /// Local file content replaced and saved.
    Written { path: PathBuf, created: bool },
    /// Local file already held the remote content; nothing was written.
    Unchanged { path: PathBuf, created: bool },
}

impl PullOutcome {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Written { path, .. } | Self::Unchanged { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum PublishOutcome {
    Published(Post),
    Skipped(SkipReason),
}

/// Result of the catalog picker flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "pick", rename_all = "camelCase")]
pub enum PickOutcome {
    Pulled(PullOutcome),
    Cancelled,
}

/// One entry shown by a [`PostPicker`](crate::traits::PostPicker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickItem {
    /// Post title.
    pub label: String,
    /// `last edited <relative time>`.
    pub description: String,
    /// Post id pulled on selection.
    pub id: i64,
}
