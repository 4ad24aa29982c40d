//! Client factory.

use std::sync::Arc;

use crate::error::Result;
use crate::halo::HaloPostApi;
use crate::traits::PostApi;

/// Creates a [`PostApi`] bound to `blog_url`.
///
/// The client is wrapped in `Arc<dyn PostApi>` so it can be memoized and
/// shared across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use halo_sync_api::{create_post_api, PostApi};
///
/// let api = create_post_api("https://blog.example.com").unwrap();
/// assert_eq!(api.base_url(), "https://blog.example.com/api/admin/posts");
/// ```
pub fn create_post_api(blog_url: &str) -> Result<Arc<dyn PostApi>> {
    Ok(Arc::new(HaloPostApi::new(blog_url)?))
}
