//! Selection UI abstract Trait

use async_trait::async_trait;

use crate::types::PickItem;

/// Presents catalog entries and returns the chosen post id.
#[async_trait]
pub trait PostPicker: Send + Sync {
    /// `None` when the user dismissed the picker.
    async fn pick(&self, items: &[PickItem]) -> Option<i64>;
}
