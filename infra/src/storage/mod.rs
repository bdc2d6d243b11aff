//! Image assets on the local filesystem.
//!
//! Files live under `root_dir/<public_id>` and are served by the API under
//! `public_base_url`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use bo_core::domain::value_objects::ImageAsset;
use bo_core::errors::DomainError;
use bo_core::services::storage::{AssetStorage, ImageUpload};

use crate::config::StorageConfig;
use crate::InfrastructureError;

pub struct LocalAssetStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalAssetStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root_dir),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key inside the root, refusing anything that could escape it
    fn path_for(&self, public_id: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(public_id);
        let safe = !public_id.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(DomainError::Storage {
                message: format!("Invalid asset key: {}", public_id),
            });
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetStorage for LocalAssetStorage {
    async fn store(&self, folder: &str, upload: ImageUpload) -> Result<ImageAsset, DomainError> {
        let public_id = upload.new_public_id(folder);
        let path = self.path_for(&public_id)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(InfrastructureError::from)?;
        }
        fs::write(&path, &upload.bytes)
            .await
            .map_err(InfrastructureError::from)?;

        tracing::debug!(public_id = %public_id, bytes = upload.bytes.len(), "Stored asset");
        Ok(ImageAsset::new(
            format!("{}/{}", self.public_base_url, public_id),
            public_id,
        ))
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        let path = self.path_for(public_id)?;
        fs::remove_file(&path)
            .await
            .map_err(InfrastructureError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn storage() -> LocalAssetStorage {
        let root = std::env::temp_dir().join(format!("bo-assets-{}", Uuid::new_v4()));
        LocalAssetStorage::new(&StorageConfig {
            root_dir: root.to_string_lossy().into_owned(),
            public_base_url: "http://cdn.test/uploads/".to_string(),
            max_upload_bytes: 1024,
        })
    }

    fn upload() -> ImageUpload {
        ImageUpload {
            file_name: "tile.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    #[tokio::test]
    async fn test_store_and_delete() {
        let storage = storage();
        let asset = storage.store("testimonials", upload()).await.unwrap();

        assert!(asset.public_id.starts_with("testimonials/"));
        assert!(asset.public_id.ends_with(".jpg"));
        assert_eq!(asset.url, format!("http://cdn.test/uploads/{}", asset.public_id));

        let path = storage.root().join(&asset.public_id);
        assert_eq!(fs::read(&path).await.unwrap(), vec![0xff, 0xd8, 0xff]);

        storage.delete(&asset.public_id).await.unwrap();
        assert!(!path.exists());
        assert!(matches!(
            storage.delete(&asset.public_id).await,
            Err(DomainError::Storage { .. })
        ));

        let _ = fs::remove_dir_all(storage.root()).await;
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let storage = storage();
        for key in ["../etc/passwd", "/abs/path.png", ""] {
            assert!(storage.delete(key).await.is_err());
        }
    }
}
