//! API client construction

use std::sync::Arc;

use halo_sync_api::{create_post_api, PostApi};

use crate::error::CoreResult;
use crate::types::HaloConfig;

/// Builds a [`PostApi`] bound to a loaded config.
pub trait ApiClientFactory: Send + Sync {
    fn create(&self, config: &HaloConfig) -> CoreResult<Arc<dyn PostApi>>;
}

/// Default factory backed by [`create_post_api`].
#[derive(Debug, Default, Clone, Copy)]
pub struct HaloApiClientFactory;

impl ApiClientFactory for HaloApiClientFactory {
    fn create(&self, config: &HaloConfig) -> CoreResult<Arc<dyn PostApi>> {
        Ok(create_post_api(&config.blog_url)?)
    }
}
