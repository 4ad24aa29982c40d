//! `PostApi` implementation for Halo

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::PostApi;
use crate::types::{
    BaseResponse, PageResponse, Post, PostQuery, PostStatus, PostSummary, UpdateContentRequest,
};

use super::HaloPostApi;

#[async_trait]
impl PostApi for HaloPostApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list(&self, query: &PostQuery) -> Result<BaseResponse<PageResponse<PostSummary>>> {
        self.get_json(&format!("?{}", query.to_query_string())).await
    }

    async fn get(&self, id: i64) -> Result<BaseResponse<Post>> {
        self.get_json(&format!("/{id}")).await
    }

    async fn update(&self, id: i64, post: &Post) -> Result<BaseResponse<Post>> {
        self.post_json(&format!("/{id}"), post).await
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<BaseResponse<Post>> {
        let body = UpdateContentRequest {
            content: content.to_string(),
        };
        self.put_json(&format!("/{id}/content"), Some(&body)).await
    }

    async fn update_status(&self, id: i64, status: PostStatus) -> Result<BaseResponse<Post>> {
        self.put_json::<Post, ()>(&format!("/{id}/status/{}", status.as_api_str()), None)
            .await
    }
}
