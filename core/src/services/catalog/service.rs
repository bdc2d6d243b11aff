//! Catalog service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::lookup::{LookupEntry, LookupKind};
use crate::domain::value_objects::ListQuery;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::LookupRepository;
use crate::services::fields;
use crate::services::storage::{discard, AssetStorage, ImageUpload};

const MAX_NAME_LEN: usize = 100;

fn folder(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::JobType => "job-types",
        LookupKind::ProductType => "product-types",
    }
}

/// Manages lookup entries and their images
pub struct CatalogService {
    entries: Arc<dyn LookupRepository>,
    storage: Arc<dyn AssetStorage>,
    max_upload_bytes: usize,
}

impl CatalogService {
    pub fn new(
        entries: Arc<dyn LookupRepository>,
        storage: Arc<dyn AssetStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            entries,
            storage,
            max_upload_bytes,
        }
    }

    pub async fn list(&self, kind: LookupKind, query: &ListQuery) -> DomainResult<Page<LookupEntry>> {
        self.entries.list(kind, query).await
    }

    pub async fn get(&self, kind: LookupKind, id: Uuid) -> DomainResult<LookupEntry> {
        self.entries
            .find_by_id(kind, id)
            .await?
            .ok_or_else(|| DomainError::not_found(kind.label()))
    }

    pub async fn create(
        &self,
        kind: LookupKind,
        name: &str,
        image: ImageUpload,
    ) -> DomainResult<LookupEntry> {
        let name = fields::required_text("name", name, MAX_NAME_LEN)?;
        image.validate(self.max_upload_bytes)?;

        let asset = self.storage.store(folder(kind), image).await?;
        let public_id = asset.public_id.clone();

        match self.entries.create(LookupEntry::new(kind, name, asset)).await {
            Ok(entry) => {
                info!(kind = %kind, entry_id = %entry.id, name = %entry.name, "Catalog entry created");
                Ok(entry)
            }
            Err(e) => {
                discard(self.storage.as_ref(), &public_id).await;
                Err(e)
            }
        }
    }

    /// Rename and/or replace the image. The old image is deleted only after
    /// the record points at the new one.
    pub async fn update(
        &self,
        kind: LookupKind,
        id: Uuid,
        name: Option<&str>,
        image: Option<ImageUpload>,
    ) -> DomainResult<LookupEntry> {
        let mut entry = self.get(kind, id).await?;
        if let Some(name) = name {
            entry.name = fields::required_text("name", name, MAX_NAME_LEN)?;
        }
        if let Some(image) = &image {
            image.validate(self.max_upload_bytes)?;
        }

        let previous = entry.image.clone();
        let replaced = match image {
            Some(image) => {
                entry.image = self.storage.store(folder(kind), image).await?;
                true
            }
            None => false,
        };
        entry.updated_at = Utc::now();
        let new_public_id = entry.image.public_id.clone();

        let updated = match self.entries.update(entry).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                if replaced {
                    discard(self.storage.as_ref(), &new_public_id).await;
                }
                return Err(DomainError::not_found(kind.label()));
            }
            Err(e) => {
                if replaced {
                    discard(self.storage.as_ref(), &new_public_id).await;
                }
                return Err(e);
            }
        };

        if replaced {
            discard(self.storage.as_ref(), &previous.public_id).await;
        }
        info!(kind = %kind, entry_id = %id, image_replaced = replaced, "Catalog entry updated");
        Ok(updated)
    }

    pub async fn delete(&self, kind: LookupKind, id: Uuid) -> DomainResult<LookupEntry> {
        let entry = self
            .entries
            .delete(kind, id)
            .await?
            .ok_or_else(|| DomainError::not_found(kind.label()))?;
        discard(self.storage.as_ref(), &entry.image.public_id).await;
        info!(kind = %kind, entry_id = %id, "Catalog entry deleted");
        Ok(entry)
    }
}
