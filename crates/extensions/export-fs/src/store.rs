//! Filesystem blob store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use courtbot_protocols::{BlobStore, StoreError};
use tokio::fs;
use tracing::{debug, info};

/// Stores each key as a file below `root`. `calendar/reservations.ics`
/// becomes `{root}/calendar/reservations.ics`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open a store, creating the root directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            fs::create_dir_all(&root).await?;
            info!("Created export directory: {}", root.display());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for `key`. Keys are relative and may not leave the root.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let invalid = || StoreError::InvalidKey(key.to_string());

        if key.is_empty() || key.contains('\\') {
            return Err(invalid());
        }
        let relative = Path::new(key);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(invalid());
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write beside the target, then swap in.
        let mut staging = path.clone().into_os_string();
        staging.push(".tmp");
        fs::write(&staging, &body).await?;
        fs::rename(&staging, &path).await?;

        debug!(
            "Wrote {} bytes of {} to {}",
            body.len(),
            content_type,
            path.display()
        );
        Ok(())
    }
}
