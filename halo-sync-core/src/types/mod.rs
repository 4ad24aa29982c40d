//! Type definition module

mod config;
mod outcome;
mod save;

pub use config::{ConfigChangeEvent, HaloConfig, CONFIG_FILE_NAME};
pub use outcome::{
    PickItem, PickOutcome, PublishOutcome, PullOutcome, PushOutcome, SaveOutcome, SkipReason,
};
pub use save::{SaveEvent, SaveReason};

// Re-export API types
pub use halo_sync_api::{
    BaseResponse, PageResponse, Post, PostQuery, PostStatus, PostSummary,
};
