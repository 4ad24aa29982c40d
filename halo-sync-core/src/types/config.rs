//! Workspace config file

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use halo_sync_api::mask_secret;

/// File name searched for in the workspace.
pub const CONFIG_FILE_NAME: &str = "halo.json";

/// Connection settings for one Halo blog.
///
/// Missing keys decode as empty strings so that an incomplete file is
/// reported as [`ConfigIncomplete`](crate::CoreError::ConfigIncomplete)
/// rather than as a format error. Unknown keys are ignored.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HaloConfig {
    #[serde(default)]
    pub blog_url: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub app_secret: String,
}

impl HaloConfig {
    /// Names of the fields that are empty after trimming, in file order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("blog_url", &self.blog_url),
            ("app_id", &self.app_id),
            ("app_secret", &self.app_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl fmt::Debug for HaloConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HaloConfig")
            .field("blog_url", &self.blog_url)
            .field("app_id", &self.app_id)
            .field("app_secret", &mask_secret(&self.app_secret))
            .finish()
    }
}

/// Notification that the config file changed on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChangeEvent {
    pub path: PathBuf,
}
