//! # halo-sync-api
//!
//! Typed client for the post collection of a [Halo](https://halo.run) blog's
//! admin API (`<blog_url>/api/admin/posts`).
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use halo_sync_api::{create_post_api, PostApi, PostQuery, PostStatus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = create_post_api("https://blog.example.com")?;
//!
//!     // List the whole collection, most recently edited first
//!     let page = api.list(&PostQuery::full_catalog()).await?;
//!     for post in page.data.map(|p| p.content).unwrap_or_default() {
//!         println!("{} ({})", post.title, post.status);
//!     }
//!
//!     // Publish post 1
//!     api.update_status(1, PostStatus::Published).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError). Error envelopes
//! sent by the blog become [`ApiError::Api`] carrying the blog's message.
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried
//! with exponential backoff for GET requests; writes are sent once.

mod error;
mod factory;
mod halo;
mod http_client;
mod traits;
mod types;
mod utils;

pub use error::{ApiError, Result};

pub use factory::create_post_api;

pub use halo::HaloPostApi;

pub use traits::PostApi;

pub use types::{
    BaseResponse, PageResponse, Post, PostQuery, PostStatus, PostSummary, UpdateContentRequest,
};

pub use utils::datetime;
pub use utils::log_sanitizer::{mask_secret, truncate_for_log};
