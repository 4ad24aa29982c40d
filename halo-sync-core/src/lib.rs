//! Halo Sync Core Library
//!
//! Core logic for keeping a directory of markdown files in step with the
//! posts of a Halo blog:
//! - Config lifecycle (`ConfigStore`)
//! - Post catalog cache (`RemoteCatalog`)
//! - Pull, push and save handling (`SyncEngine`)
//! - Publishing (`PublishController`)
//!
//! The file surface, config watching and the selection UI are abstracted
//! through traits so the platform layer can supply its own implementations.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ConfigStore, PublishController, RemoteCatalog, SyncContext, SyncEngine};
pub use traits::{
    ApiClientFactory, ConfigWatcher, HaloApiClientFactory, NoopConfigWatcher, PostPicker, Workspace,
};
