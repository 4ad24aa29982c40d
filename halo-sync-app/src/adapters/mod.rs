//! Local adapters for the CLI frontend.

mod file_stamp;
mod local_workspace;
mod polling_config_watcher;
mod save_poller;

pub use local_workspace::{fingerprint, LocalWorkspace};
pub use polling_config_watcher::PollingConfigWatcher;
pub use save_poller::MarkdownSavePoller;
