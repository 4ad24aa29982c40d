use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BaseResponse, PageResponse, Post, PostQuery, PostStatus, PostSummary};

/// Halo admin post API.
///
/// Every method returns the raw response envelope; whether a missing `data`
/// is an error is decided by the caller. Transport failures and error
/// envelopes are reported as [`ApiError`](crate::ApiError).
#[async_trait]
pub trait PostApi: Send + Sync {
    /// Base URL of the post collection (`<blog>/api/admin/posts`).
    fn base_url(&self) -> &str;

    /// List post summaries (paged + filtered).
    async fn list(&self, query: &PostQuery) -> Result<BaseResponse<PageResponse<PostSummary>>>;

    /// Fetch a single post including its content.
    async fn get(&self, id: i64) -> Result<BaseResponse<Post>>;

    /// Replace a post wholesale.
    async fn update(&self, id: i64, post: &Post) -> Result<BaseResponse<Post>>;

    /// Replace only the markdown content of a post.
    async fn update_content(&self, id: i64, content: &str) -> Result<BaseResponse<Post>>;

    /// Transition a post to another status.
    async fn update_status(&self, id: i64, status: PostStatus) -> Result<BaseResponse<Post>>;
}
