//! Image asset storage used by the catalog and testimonials.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::domain::value_objects::ImageAsset;
use crate::errors::{DomainError, ValidationError};

/// An uploaded image before it is stored
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Only `image/*` uploads within `max_bytes` are accepted
    pub fn validate(&self, max_bytes: usize) -> Result<(), ValidationError> {
        if !self.content_type.starts_with("image/") {
            return Err(ValidationError::UnsupportedMediaType {
                content_type: self.content_type.clone(),
            });
        }
        if self.bytes.is_empty() {
            return Err(ValidationError::required("image"));
        }
        if self.bytes.len() > max_bytes {
            return Err(ValidationError::FileTooLarge { max_bytes });
        }
        Ok(())
    }

    /// File extension derived from the name, falling back to the mime subtype
    pub fn extension(&self) -> String {
        let from_name = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
        from_name.unwrap_or_else(|| {
            self.content_type
                .trim_start_matches("image/")
                .split(['+', ';'])
                .next()
                .unwrap_or("bin")
                .to_string()
        })
    }

    /// Fresh storage key under `folder`
    pub fn new_public_id(&self, folder: &str) -> String {
        format!("{}/{}.{}", folder, Uuid::new_v4(), self.extension())
    }
}

/// Where uploaded images live
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Store an image under `folder`, returning its public URL and key
    async fn store(&self, folder: &str, upload: ImageUpload) -> Result<ImageAsset, DomainError>;

    /// Delete a stored image by key
    async fn delete(&self, public_id: &str) -> Result<(), DomainError>;
}

/// Keeps uploaded bytes in memory
#[derive(Default)]
pub struct InMemoryAssetStorage {
    assets: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryAssetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, public_id: &str) -> bool {
        self.assets
            .lock()
            .map(|assets| assets.contains_key(public_id))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.assets.lock().map(|assets| assets.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AssetStorage for InMemoryAssetStorage {
    async fn store(&self, folder: &str, upload: ImageUpload) -> Result<ImageAsset, DomainError> {
        let public_id = upload.new_public_id(folder);
        let mut assets = self.assets.lock().map_err(|_| DomainError::Storage {
            message: "asset store poisoned".to_string(),
        })?;
        assets.insert(public_id.clone(), upload.bytes);
        Ok(ImageAsset::new(format!("memory://{}", public_id), public_id))
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        let mut assets = self.assets.lock().map_err(|_| DomainError::Storage {
            message: "asset store poisoned".to_string(),
        })?;
        assets.remove(public_id).map(|_| ()).ok_or_else(|| DomainError::Storage {
            message: format!("asset {} not found", public_id),
        })
    }
}

/// Delete an asset that is no longer referenced. Failures are logged only.
pub async fn discard(storage: &dyn AssetStorage, public_id: &str) {
    if let Err(e) = storage.delete(public_id).await {
        warn!(public_id, error = %e, "Failed to delete stored asset");
    }
}
