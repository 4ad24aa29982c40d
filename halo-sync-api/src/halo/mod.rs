//! Halo admin post API client

mod api;
mod http;

use std::time::Duration;

use reqwest::Client;

use crate::error::{ApiError, Result};

/// Path of the post collection below the blog url.
pub(crate) const POSTS_PATH: &str = "/api/admin/posts";
/// Connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Whole-request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Retries for idempotent GET requests.
pub(crate) const MAX_READ_RETRIES: u32 = 2;

/// Post API client bound to one blog.
pub struct HaloPostApi {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl HaloPostApi {
    /// Create a client for `blog_url`.
    ///
    /// Trailing slashes are stripped before `/api/admin/posts` is appended.
    pub fn new(blog_url: &str) -> Result<Self> {
        let base_url = posts_base_url(blog_url)?;
        log::info!("Build post base url: {base_url}");
        Ok(Self {
            client: create_http_client()?,
            base_url,
        })
    }
}

/// Build `<blog_url>/api/admin/posts`, rejecting blank urls.
pub(crate) fn posts_base_url(blog_url: &str) -> Result<String> {
    let trimmed = blog_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ApiError::InvalidParameter {
            param: "blog_url".to_string(),
            detail: "Domain url must not be blank".to_string(),
        });
    }
    Ok(format!("{trimmed}{POSTS_PATH}"))
}

/// HTTP client with the default timeouts.
fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ApiError::NetworkError {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_appends_posts_path() {
        assert_eq!(
            posts_base_url("https://blog.example.com").unwrap(),
            "https://blog.example.com/api/admin/posts"
        );
    }

    #[test]
    fn base_url_strips_trailing_slashes() {
        assert_eq!(
            posts_base_url("https://blog.example.com//").unwrap(),
            "https://blog.example.com/api/admin/posts"
        );
    }

    #[test]
    fn blank_base_url_is_rejected() {
        assert!(matches!(
            posts_base_url("  "),
            Err(ApiError::InvalidParameter { .. })
        ));
        assert!(matches!(
            posts_base_url("/"),
            Err(ApiError::InvalidParameter { .. })
        ));
    }
}
