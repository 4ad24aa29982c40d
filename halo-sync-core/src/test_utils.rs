//! Test helper module
//!
//! Provides mock implementations and convenient test factory methods.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use halo_sync_api::{
    ApiError, BaseResponse, PageResponse, Post, PostApi, PostQuery, PostStatus, PostSummary,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{PublishController, SyncContext, SyncEngine};
use crate::traits::{ApiClientFactory, ConfigWatcher, PostPicker, Workspace};
use crate::types::{HaloConfig, PickItem};

pub const VALID_CONFIG: &str =
    r#"{"blog_url":"https://blog.example.com","app_id":"a","app_secret":"s"}"#;

pub fn summary(id: i64, title: &str) -> PostSummary {
    PostSummary {
        id,
        title: title.to_string(),
        status: PostStatus::Drafted,
        url: format!("/archives/{id}"),
        summary: String::new(),
        create_time: None,
        update_time: None,
        edit_time: None,
    }
}

pub fn summary_edited(id: i64, title: &str, secs_ago: i64) -> PostSummary {
    PostSummary {
        edit_time: Some(Utc::now() - chrono::Duration::seconds(secs_ago)),
        ..summary(id, title)
    }
}

pub fn post(id: i64, title: &str, content: &str) -> Post {
    Post {
        summary: summary(id, title),
        original_content: content.to_string(),
        format_content: String::new(),
    }
}

// ===== MockPostApi =====

#[derive(Default)]
pub struct MockPostApi {
    listed: RwLock<Vec<PostSummary>>,
    list_json: RwLock<Option<String>>,
    posts: RwLock<HashMap<i64, Post>>,
    list_error: RwLock<Option<ApiError>>,
    list_without_data: RwLock<bool>,
    list_delay_ms: RwLock<u64>,
    update_error: RwLock<Option<ApiError>>,
    last_query: RwLock<Option<PostQuery>>,
    list_calls: AtomicUsize,
    content_updates: RwLock<Vec<(i64, String)>>,
    status_updates: RwLock<Vec<(i64, PostStatus)>>,
}

impl MockPostApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_posts(&self, posts: Vec<PostSummary>) {
        *self.listed.write().await = posts;
    }

    /// Serve this raw envelope from `list` instead of the summaries.
    pub async fn set_list_json(&self, json: &str) {
        *self.list_json.write().await = Some(json.to_string());
    }

    pub async fn insert_post(&self, post: Post) {
        self.posts.write().await.insert(post.id(), post);
    }

    pub async fn set_list_error(&self, err: Option<ApiError>) {
        *self.list_error.write().await = err;
    }

    pub async fn set_list_without_data(&self, value: bool) {
        *self.list_without_data.write().await = value;
    }

    pub async fn set_list_delay_ms(&self, ms: u64) {
        *self.list_delay_ms.write().await = ms;
    }

    pub async fn set_update_error(&self, err: Option<ApiError>) {
        *self.update_error.write().await = err;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub async fn last_query(&self) -> Option<PostQuery> {
        self.last_query.read().await.clone()
    }

    pub async fn content_updates(&self) -> Vec<(i64, String)> {
        self.content_updates.read().await.clone()
    }

    pub async fn status_updates(&self) -> Vec<(i64, PostStatus)> {
        self.status_updates.read().await.clone()
    }

    async fn check_update_error(&self) -> halo_sync_api::Result<()> {
        match self.update_error.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn modify_post(&self, id: i64, apply: impl FnOnce(&mut Post)) -> Post {
        let mut posts = self.posts.write().await;
        let stored = posts.entry(id).or_insert_with(|| post(id, "", ""));
        apply(stored);
        stored.clone()
    }
}

#[async_trait]
impl PostApi for MockPostApi {
    fn base_url(&self) -> &str {
        "https://blog.example.com/api/admin/posts"
    }

    async fn list(
        &self,
        query: &PostQuery,
    ) -> halo_sync_api::Result<BaseResponse<PageResponse<PostSummary>>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.write().await = Some(query.clone());

        let delay = *self.list_delay_ms.read().await;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if let Some(err) = self.list_error.read().await.clone() {
            return Err(err);
        }
        if *self.list_without_data.read().await {
            return Ok(BaseResponse::empty(500, "Internal error"));
        }
        if let Some(json) = self.list_json.read().await.as_deref() {
            return serde_json::from_str(json).map_err(|e| ApiError::ParseError {
                detail: e.to_string(),
            });
        }
        Ok(BaseResponse::ok(PageResponse::single(
            self.listed.read().await.clone(),
        )))
    }

    async fn get(&self, id: i64) -> halo_sync_api::Result<BaseResponse<Post>> {
        Ok(match self.posts.read().await.get(&id) {
            Some(post) => BaseResponse::ok(post.clone()),
            None => BaseResponse::empty(404, "Post not found"),
        })
    }

    async fn update(&self, id: i64, post: &Post) -> halo_sync_api::Result<BaseResponse<Post>> {
        self.check_update_error().await?;
        let replacement = post.clone();
        Ok(BaseResponse::ok(
            self.modify_post(id, move |stored| *stored = replacement).await,
        ))
    }

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> halo_sync_api::Result<BaseResponse<Post>> {
        self.check_update_error().await?;
        self.content_updates
            .write()
            .await
            .push((id, content.to_string()));
        let content = content.to_string();
        Ok(BaseResponse::ok(
            self.modify_post(id, move |stored| stored.original_content = content)
                .await,
        ))
    }

    async fn update_status(
        &self,
        id: i64,
        status: PostStatus,
    ) -> halo_sync_api::Result<BaseResponse<Post>> {
        self.check_update_error().await?;
        self.status_updates.write().await.push((id, status));
        Ok(BaseResponse::ok(
            self.modify_post(id, move |stored| stored.summary.status = status)
                .await,
        ))
    }
}

// ===== MockWorkspace =====

/// In-memory workspace rooted at `/ws`.
pub struct MockWorkspace {
    root: Mutex<Option<PathBuf>>,
    disk: RwLock<HashMap<PathBuf, String>>,
    buffers: RwLock<HashMap<PathBuf, String>>,
    find_calls: AtomicUsize,
    create_calls: AtomicUsize,
    replace_calls: AtomicUsize,
    save_calls: AtomicUsize,
}

impl MockWorkspace {
    pub fn new() -> Self {
        Self {
            root: Mutex::new(Some(PathBuf::from("/ws"))),
            disk: RwLock::new(HashMap::new()),
            buffers: RwLock::new(HashMap::new()),
            find_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            replace_calls: AtomicUsize::new(0),
            save_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_config(json: &str) -> Self {
        let ws = Self::new();
        ws.disk
            .try_write()
            .unwrap()
            .insert(PathBuf::from("/ws/halo.json"), json.to_string());
        ws
    }

    pub fn set_root(&self, root: Option<PathBuf>) {
        *self.root.lock().unwrap() = root;
    }

    pub async fn insert_file(&self, path: &str, content: &str) {
        self.disk
            .write()
            .await
            .insert(PathBuf::from(path), content.to_string());
    }

    pub async fn disk(&self, path: &Path) -> Option<String> {
        self.disk.read().await.get(path).cloned()
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn replace_calls(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Workspace for MockWorkspace {
    fn root(&self) -> Option<PathBuf> {
        self.root.lock().unwrap().clone()
    }

    async fn find_files(&self, file_name: &str) -> CoreResult<Vec<PathBuf>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let mut found: Vec<PathBuf> = self
            .disk
            .read()
            .await
            .keys()
            .filter(|p| p.file_name().is_some_and(|n| n == file_name))
            .cloned()
            .collect();
        found.sort();
        Ok(found)
    }

    async fn read_text(&self, path: &Path) -> CoreResult<String> {
        if let Some(text) = self.buffers.read().await.get(path) {
            return Ok(text.clone());
        }
        self.disk
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| CoreError::WorkspaceError(format!("{} not found", path.display())))
    }

    async fn create_file(&self, path: &Path) -> CoreResult<bool> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut disk = self.disk.write().await;
        if disk.contains_key(path) {
            return Ok(false);
        }
        disk.insert(path.to_path_buf(), String::new());
        Ok(true)
    }

    async fn replace_content(&self, path: &Path, text: &str) -> CoreResult<()> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        self.buffers
            .write()
            .await
            .insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    async fn save(&self, path: &Path) -> CoreResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(text) = self.buffers.write().await.remove(path) {
            self.disk.write().await.insert(path.to_path_buf(), text);
        }
        Ok(())
    }
}

// ===== MockConfigWatcher =====

#[derive(Default)]
pub struct MockConfigWatcher {
    watched: RwLock<Vec<PathBuf>>,
}

impl MockConfigWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn watched(&self) -> Vec<PathBuf> {
        self.watched.read().await.clone()
    }
}

#[async_trait]
impl ConfigWatcher for MockConfigWatcher {
    async fn watch(&self, path: &Path) -> CoreResult<()> {
        self.watched.write().await.push(path.to_path_buf());
        Ok(())
    }
}

// ===== MockPicker =====

#[derive(Default)]
pub struct MockPicker {
    choice: RwLock<Option<i64>>,
    offered: RwLock<Vec<PickItem>>,
}

impl MockPicker {
    pub async fn choose(&self, id: Option<i64>) {
        *self.choice.write().await = id;
    }

    pub async fn offered(&self) -> Vec<PickItem> {
        self.offered.read().await.clone()
    }
}

#[async_trait]
impl PostPicker for MockPicker {
    async fn pick(&self, items: &[PickItem]) -> Option<i64> {
        *self.offered.write().await = items.to_vec();
        *self.choice.read().await
    }
}

// ===== MockApiFactory =====

/// Hands out the same [`MockPostApi`] for every config.
pub struct MockApiFactory {
    api: Arc<MockPostApi>,
    created: AtomicUsize,
    blog_urls: Mutex<Vec<String>>,
}

impl MockApiFactory {
    pub fn new(api: Arc<MockPostApi>) -> Self {
        Self {
            api,
            created: AtomicUsize::new(0),
            blog_urls: Mutex::new(Vec::new()),
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn blog_urls(&self) -> Vec<String> {
        self.blog_urls.lock().unwrap().clone()
    }
}

impl ApiClientFactory for MockApiFactory {
    fn create(&self, config: &HaloConfig) -> CoreResult<Arc<dyn PostApi>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.blog_urls.lock().unwrap().push(config.blog_url.clone());
        Ok(self.api.clone())
    }
}

// ===== Test environment =====

pub struct TestEnv {
    pub ctx: Arc<SyncContext>,
    pub api: Arc<MockPostApi>,
    pub workspace: Arc<MockWorkspace>,
    pub watcher: Arc<MockConfigWatcher>,
    pub picker: Arc<MockPicker>,
    pub factory: Arc<MockApiFactory>,
    pub sync: SyncEngine,
    pub publish: PublishController,
}

impl TestEnv {
    /// Workspace at `/ws` holding a valid `halo.json`.
    pub async fn new() -> Self {
        Self::build(MockWorkspace::with_config(VALID_CONFIG))
    }

    /// Workspace at `/ws` without any config file.
    pub async fn without_config() -> Self {
        Self::build(MockWorkspace::new())
    }

    fn build(workspace: MockWorkspace) -> Self {
        let api = Arc::new(MockPostApi::new());
        let workspace = Arc::new(workspace);
        let watcher = Arc::new(MockConfigWatcher::new());
        let picker = Arc::new(MockPicker::default());
        let factory = Arc::new(MockApiFactory::new(api.clone()));

        let ctx = Arc::new(SyncContext::new(
            workspace.clone(),
            watcher.clone(),
            picker.clone(),
            factory.clone(),
        ));

        Self {
            sync: SyncEngine::new(ctx.clone()),
            publish: PublishController::new(ctx.clone()),
            ctx,
            api,
            workspace,
            watcher,
            picker,
            factory,
        }
    }
}
