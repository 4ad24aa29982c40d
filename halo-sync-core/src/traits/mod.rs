//! Collaborator abstract Trait definitions

mod api_factory;
mod config_watcher;
mod post_picker;
mod workspace;

pub use api_factory::{ApiClientFactory, HaloApiClientFactory};
pub use config_watcher::{ConfigWatcher, NoopConfigWatcher};
pub use post_picker::PostPicker;
pub use workspace::Workspace;
