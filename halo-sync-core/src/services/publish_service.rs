//! Publishing

use std::path::Path;
use std::sync::Arc;

use halo_sync_api::PostStatus;

use crate::error::{CoreError, CoreResult};
use crate::services::{SyncContext, SyncEngine};
use crate::types::{PublishOutcome, SkipReason};

/// Moves linked posts to `PUBLISHED`.
pub struct PublishController {
    ctx: Arc<SyncContext>,
}

impl PublishController {
    #[must_use]
    pub fn new(ctx: Arc<SyncContext>) -> Self {
        Self { ctx }
    }

    /// Publish the post titled `title`.
    ///
    /// The cached entry keeps its previous status; refresh the catalog to
    /// observe the change.
    pub async fn publish(&self, title: &str) -> CoreResult<PublishOutcome> {
        let Some(entry) = self.ctx.catalog.lookup(title).await? else {
            log::debug!("No remote post titled {title:?}, publish skipped");
            return Ok(PublishOutcome::Skipped(SkipReason::Untracked {
                title: title.to_string(),
            }));
        };

        let api = self.ctx.catalog.api_client().await?;
        match api.update_status(entry.id, PostStatus::Published).await {
            Ok(response) => match response.data {
                Some(post) => {
                    log::info!("Published {title:?} (post {})", entry.id);
                    Ok(PublishOutcome::Published(post))
                }
                None => Err(CoreError::RemoteUpdateFailure(response.message)),
            },
            Err(e) => {
                log::error!("Failed to publish {title:?}: {e}");
                Err(CoreError::RemoteUpdateFailure(e.user_message()))
            }
        }
    }

    /// Publish the post linked to a local file.
    pub async fn publish_file(&self, path: &Path) -> CoreResult<PublishOutcome> {
        match SyncEngine::derive_post_key(path) {
            Some(title) => self.publish(&title).await,
            None => Ok(PublishOutcome::Skipped(SkipReason::NotMarkdown)),
        }
    }
}
