//! Shared helpers for live Halo API tests

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use halo_sync_api::{PostApi, PostQuery, PostSummary, create_post_api};

/// Skip the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique marker to append to content written by a test.
pub fn generate_test_marker() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("<!-- halo-sync-test-{} -->", &uuid.to_string()[..8])
}

/// Live test context
pub struct TestContext {
    pub api: Arc<dyn PostApi>,
    /// Title of a disposable post the tests may modify.
    pub post_title: String,
}

impl TestContext {
    /// Built from `HALO_BLOG_URL` and `HALO_TEST_POST_TITLE`.
    pub fn from_env() -> Option<Self> {
        let blog_url = env::var("HALO_BLOG_URL").ok()?;
        let post_title = env::var("HALO_TEST_POST_TITLE").ok()?;
        let api = create_post_api(&blog_url).ok()?;
        Some(Self { api, post_title })
    }

    /// Look up the test post in the full listing.
    pub async fn find_test_post(&self) -> Option<PostSummary> {
        let response = self.api.list(&PostQuery::full_catalog()).await.ok()?;
        response
            .data?
            .content
            .into_iter()
            .find(|p| p.title == self.post_title)
    }
}
