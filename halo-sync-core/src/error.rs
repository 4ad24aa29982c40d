//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use halo_sync_api::ApiError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Zero or more than one config file in the workspace
    #[error("Expected exactly one {file_name} in the workspace, found {found}")]
    ConfigMissing { file_name: String, found: usize },

    /// Config file is not valid JSON
    #[error("Config file {path} has an invalid format: {detail}")]
    ConfigInvalidFormat { path: String, detail: String },

    /// Config parsed but required fields are empty
    #[error("Config is incomplete, missing: {}", missing.join(", "))]
    ConfigIncomplete { missing: Vec<String> },

    /// No workspace root to resolve post files against
    #[error("No workspace is open")]
    NoWorkspaceOpen,

    /// Listing posts failed or returned no payload
    #[error("Failed to list posts: {0}")]
    RemoteListFailure(String),

    /// Fetching a post returned no payload
    #[error("Post {id} not found")]
    RemoteNotFound { id: i64 },

    /// Updating content or status failed
    #[error("Failed to update post: {0}")]
    RemoteUpdateFailure(String),

    /// Local file access failed
    #[error("Workspace error: {0}")]
    WorkspaceError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// API client error (converting from library)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Whether it is expected behavior (user setup, missing resources), used to pick the log level.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ConfigMissing { .. }
            | Self::ConfigInvalidFormat { .. }
            | Self::ConfigIncomplete { .. }
            | Self::NoWorkspaceOpen
            | Self::RemoteNotFound { .. }
            | Self::ValidationError(_) => true,
            Self::Api(e) => matches!(e, ApiError::InvalidParameter { .. } | ApiError::Api { .. }),
            _ => false,
        }
    }

    /// Message shown to the user for this failure.
    ///
    /// Remote failures carry the blog's own message when it sent one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_lists_missing_fields() {
        let e = CoreError::ConfigIncomplete {
            missing: vec!["app_id".to_string(), "app_secret".to_string()],
        };
        assert_eq!(e.to_string(), "Config is incomplete, missing: app_id, app_secret");
    }

    #[test]
    fn expected_errors_are_user_side() {
        assert!(CoreError::NoWorkspaceOpen.is_expected());
        assert!(CoreError::RemoteNotFound { id: 3 }.is_expected());
        assert!(!CoreError::RemoteListFailure("timeout".into()).is_expected());
        assert!(!CoreError::Api(ApiError::Timeout {
            detail: "10s".into()
        })
        .is_expected());
    }

    #[test]
    fn serializes_with_code() {
        let json = serde_json::to_value(CoreError::RemoteNotFound { id: 42 }).unwrap();
        assert_eq!(json["code"], "RemoteNotFound");
        assert_eq!(json["details"]["id"], 42);
    }
}
