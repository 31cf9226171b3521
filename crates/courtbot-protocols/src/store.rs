//! Blob storage for published exports.

use async_trait::async_trait;

use crate::error::StoreError;

/// Flat key/value storage. Keys are `/`-separated paths such as
/// `calendar/reservations.ics`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read a blob. A missing key is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a blob, replacing any previous content.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StoreError>;
}
