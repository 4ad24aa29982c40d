//! Local file <-> remote post synchronization

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use halo_sync_api::ApiError;

use crate::error::{CoreError, CoreResult};
use crate::services::SyncContext;
use crate::types::{
    PickItem, PickOutcome, PullOutcome, PushOutcome, SaveEvent, SaveOutcome, SaveReason,
    SkipReason,
};
use crate::utils::time_ago;

const MARKDOWN_EXT: &str = ".md";

/// Sync engine
///
/// A local file `<title>.md` at the workspace root is linked to the remote
/// post titled `<title>`. Updates are full-content overwrites in both
/// directions.
pub struct SyncEngine {
    ctx: Arc<SyncContext>,
}

impl SyncEngine {
    #[must_use]
    pub fn new(ctx: Arc<SyncContext>) -> Self {
        Self { ctx }
    }

    /// Title a file is linked to: its name minus a `.md` suffix.
    ///
    /// The suffix match is case-sensitive and an empty title yields `None`.
    #[must_use]
    pub fn derive_post_key(path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        let title = name.strip_suffix(MARKDOWN_EXT)?;
        if title.is_empty() {
            None
        } else {
            Some(title.to_string())
        }
    }

    /// Fetch a post and write it to `<root>/<title>.md`.
    ///
    /// An existing file is never overwritten on creation. When it already
    /// holds the remote content nothing is written.
    pub async fn pull(&self, post_id: i64) -> CoreResult<PullOutcome> {
        let api = self.ctx.catalog.api_client().await?;
        let post = match api.get(post_id).await {
            Ok(response) => response
                .data
                .ok_or(CoreError::RemoteNotFound { id: post_id })?,
            Err(ApiError::Api { status: 404, .. } | ApiError::Http { status: 404, .. }) => {
                return Err(CoreError::RemoteNotFound { id: post_id });
            }
            Err(e) => return Err(e.into()),
        };

        let root = self.ctx.workspace.root().ok_or(CoreError::NoWorkspaceOpen)?;
        let title = post.title();
        if title.is_empty() || title.contains(['/', '\\']) {
            return Err(CoreError::ValidationError(format!(
                "Post {post_id} has a title that is not a valid file name: {title:?}"
            )));
        }
        let path = root.join(format!("{title}{MARKDOWN_EXT}"));

        let created = self.ctx.workspace.create_file(&path).await?;
        let current = self.ctx.workspace.read_text(&path).await?;
        if current == post.original_content {
            log::debug!("{} already up to date", path.display());
            return Ok(PullOutcome::Unchanged { path, created });
        }

        self.ctx
            .workspace
            .replace_content(&path, &post.original_content)
            .await?;
        self.ctx.workspace.save(&path).await?;
        log::info!("Pulled post {post_id} into {}", path.display());

        Ok(PullOutcome::Written { path, created })
    }

    /// Replace the remote content of the post titled `title`.
    ///
    /// A title with no remote post is skipped without any remote call.
    pub async fn push(&self, title: &str, content: &str) -> CoreResult<PushOutcome> {
        let Some(entry) = self.ctx.catalog.lookup(title).await? else {
            log::debug!("No remote post titled {title:?}, push skipped");
            return Ok(PushOutcome::Skipped(SkipReason::Untracked {
                title: title.to_string(),
            }));
        };

        let api = self.ctx.catalog.api_client().await?;
        // The cache entry keeps its old edit time until the next refresh.
        match api.update_content(entry.id, content).await {
            Ok(response) => match response.data {
                Some(post) => {
                    log::info!("Pushed {title:?} to post {}", entry.id);
                    Ok(PushOutcome::Updated(post))
                }
                None => Err(CoreError::RemoteUpdateFailure(response.message)),
            },
            Err(e) => {
                log::error!("Failed to push {title:?}: {e}");
                Err(CoreError::RemoteUpdateFailure(e.user_message()))
            }
        }
    }

    /// Push a saved document when the user saved it.
    pub async fn on_save(&self, event: SaveEvent) -> CoreResult<SaveOutcome> {
        if event.reason != SaveReason::Manual {
            return Ok(PushOutcome::Skipped(SkipReason::NotManualSave));
        }
        let Some(title) = Self::derive_post_key(&event.path) else {
            return Ok(PushOutcome::Skipped(SkipReason::NotMarkdown));
        };
        self.push(&title, &event.text).await
    }

    /// Picker entries for a fresh listing, most recently edited first.
    pub async fn catalog_items(&self) -> CoreResult<Vec<PickItem>> {
        let now = Utc::now();
        let posts = self.ctx.catalog.list_posts().await?;
        Ok(posts
            .into_iter()
            .map(|post| PickItem {
                description: format!(
                    "last edited {}",
                    post.edit_time
                        .map_or_else(|| "at an unknown time".to_string(), |t| time_ago(t, now))
                ),
                label: post.title,
                id: post.id,
            })
            .collect())
    }

    /// Let the user pick a post and pull it.
    pub async fn open_catalog_picker(&self) -> CoreResult<PickOutcome> {
        let items = self.catalog_items().await?;
        match self.ctx.picker.pick(&items).await {
            Some(id) => Ok(PickOutcome::Pulled(self.pull(id).await?)),
            None => Ok(PickOutcome::Cancelled),
        }
    }
}
