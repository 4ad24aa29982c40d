//! Title-keyed cache of remote post summaries

use std::collections::HashMap;
use std::sync::Arc;

use halo_sync_api::{PostApi, PostQuery, PostSummary};
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::services::ConfigStore;
use crate::traits::ApiClientFactory;

struct BoundClient {
    generation: u64,
    api: Arc<dyn PostApi>,
}

#[derive(Default)]
struct CacheState {
    /// Config generation the entries were listed under.
    generation: Option<u64>,
    entries: HashMap<String, PostSummary>,
}

impl CacheState {
    fn clear(&mut self) {
        self.generation = None;
        self.entries.clear();
    }
}

/// Remote post catalog.
///
/// The cache is either empty or exactly the result of the last successful
/// list. It is populated lazily and never revalidated on its own; callers
/// that need fresh data call [`refresh`](Self::refresh).
pub struct RemoteCatalog {
    config_store: Arc<ConfigStore>,
    factory: Arc<dyn ApiClientFactory>,
    client: Mutex<Option<BoundClient>>,
    cache: Mutex<CacheState>,
}

impl RemoteCatalog {
    #[must_use]
    pub fn new(config_store: Arc<ConfigStore>, factory: Arc<dyn ApiClientFactory>) -> Self {
        Self {
            config_store,
            factory,
            client: Mutex::new(None),
            cache: Mutex::new(CacheState::default()),
        }
    }

    /// API client bound to the current config.
    ///
    /// Rebuilt whenever the config generation changed since it was built.
    /// Cache entries from an older generation are dropped on the next read.
    pub async fn api_client(&self) -> CoreResult<Arc<dyn PostApi>> {
        Ok(self.bound_client().await?.0)
    }

    /// List the whole collection and replace the cache with it.
    pub async fn refresh(&self) -> CoreResult<HashMap<String, PostSummary>> {
        let mut cache = self.cache.lock().await;
        self.populate(&mut cache).await?;
        Ok(cache.entries.clone())
    }

    /// Cache contents, listed first if the cache is empty.
    pub async fn cached(&self) -> CoreResult<HashMap<String, PostSummary>> {
        let mut cache = self.cache.lock().await;
        self.ensure_populated(&mut cache).await?;
        Ok(cache.entries.clone())
    }

    /// Remote summary for `title`, listing first if the cache is empty.
    pub async fn lookup(&self, title: &str) -> CoreResult<Option<PostSummary>> {
        let mut cache = self.cache.lock().await;
        self.ensure_populated(&mut cache).await?;
        Ok(cache.entries.get(title).cloned())
    }

    /// Empty the cache without a remote call.
    pub async fn clear(&self) {
        self.cache.lock().await.clear();
    }

    /// Refresh, then return all entries, most recently edited first.
    pub async fn list_posts(&self) -> CoreResult<Vec<PostSummary>> {
        let entries = self.refresh().await?;
        let mut posts: Vec<PostSummary> = entries.into_values().collect();
        posts.sort_by(|a, b| {
            b.edit_time
                .cmp(&a.edit_time)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(posts)
    }

    async fn bound_client(&self) -> CoreResult<(Arc<dyn PostApi>, u64)> {
        let (config, generation) = self.config_store.current().await?;

        let mut client = self.client.lock().await;
        if let Some(bound) = client.as_ref() {
            if bound.generation == generation {
                return Ok((bound.api.clone(), generation));
            }
            log::debug!("Config generation changed, rebuilding API client");
        }

        let api = self.factory.create(&config)?;
        *client = Some(BoundClient {
            generation,
            api: api.clone(),
        });
        Ok((api, generation))
    }

    // The cache lock is held across the list request, so callers that find
    // the cache empty while a populate is in flight wait for it instead of
    // issuing a second list.
    async fn ensure_populated(&self, cache: &mut CacheState) -> CoreResult<()> {
        let generation = self.config_store.current().await?.1;
        if cache.generation != Some(generation) {
            cache.clear();
        }
        if cache.entries.is_empty() {
            self.populate(cache).await?;
        }
        Ok(())
    }

    async fn populate(&self, cache: &mut CacheState) -> CoreResult<()> {
        let (api, generation) = match self.bound_client().await {
            Ok(bound) => bound,
            Err(e) => {
                cache.clear();
                return Err(e);
            }
        };

        let response = match api.list(&PostQuery::full_catalog()).await {
            Ok(response) => response,
            Err(e) => {
                cache.clear();
                log::error!("Failed to list posts: {e}");
                return Err(CoreError::RemoteListFailure(e.user_message()));
            }
        };

        let Some(page) = response.data else {
            cache.clear();
            log::error!("List response carried no data: {}", response.message);
            return Err(CoreError::RemoteListFailure(if response.message.is_empty() {
                "response carried no data".to_string()
            } else {
                response.message
            }));
        };

        // Duplicate titles: the later entry wins.
        let entries: HashMap<String, PostSummary> = page
            .content
            .into_iter()
            .map(|post| (post.title.clone(), post))
            .collect();
        log::info!("Catalog refreshed with {} posts", entries.len());

        cache.entries = entries;
        cache.generation = Some(generation);
        Ok(())
    }
}
