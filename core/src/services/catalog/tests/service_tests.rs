//! Unit tests for the catalog service

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::lookup::LookupKind;
use crate::domain::value_objects::ListQuery;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::InMemoryLookupRepository;
use crate::services::catalog::CatalogService;
use crate::services::storage::{ImageUpload, InMemoryAssetStorage};

const MAX_UPLOAD: usize = 1024;

fn service() -> (CatalogService, Arc<InMemoryAssetStorage>) {
    let storage = Arc::new(InMemoryAssetStorage::new());
    let service = CatalogService::new(
        Arc::new(InMemoryLookupRepository::new()),
        storage.clone(),
        MAX_UPLOAD,
    );
    (service, storage)
}

fn png() -> ImageUpload {
    ImageUpload {
        file_name: "icon.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![137, 80, 78, 71],
    }
}

#[tokio::test]
async fn test_create_stores_image() {
    let (service, storage) = service();
    let entry = service
        .create(LookupKind::JobType, "  Plumbing ", png())
        .await
        .unwrap();

    assert_eq!(entry.name, "Plumbing");
    assert!(entry.image.public_id.starts_with("job-types/"));
    assert!(storage.contains(&entry.image.public_id));
}

#[tokio::test]
async fn test_duplicate_name_per_kind_conflicts_and_cleans_up() {
    let (service, storage) = service();
    service.create(LookupKind::JobType, "Plumbing", png()).await.unwrap();

    let err = service
        .create(LookupKind::JobType, "PLUMBING", png())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
    assert_eq!(storage.len(), 1);

    // Same name is fine under the other kind
    service.create(LookupKind::ProductType, "Plumbing", png()).await.unwrap();
    assert_eq!(storage.len(), 2);
}

#[tokio::test]
async fn test_rejects_non_image_upload() {
    let (service, storage) = service();
    let err = service
        .create(
            LookupKind::ProductType,
            "Tiles",
            ImageUpload {
                content_type: "application/pdf".to_string(),
                ..png()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::UnsupportedMediaType { .. })
    ));
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_update_replaces_image_after_record_update() {
    let (service, storage) = service();
    let entry = service.create(LookupKind::JobType, "Painting", png()).await.unwrap();

    let renamed = service
        .update(LookupKind::JobType, entry.id, Some("House painting"), None)
        .await
        .unwrap();
    assert_eq!(renamed.name, "House painting");
    assert_eq!(renamed.image, entry.image);

    let replaced = service
        .update(LookupKind::JobType, entry.id, None, Some(png()))
        .await
        .unwrap();
    assert_ne!(replaced.image.public_id, entry.image.public_id);
    assert!(!storage.contains(&entry.image.public_id));
    assert!(storage.contains(&replaced.image.public_id));
    assert_eq!(storage.len(), 1);
}

#[tokio::test]
async fn test_update_conflict_keeps_old_image() {
    let (service, storage) = service();
    service.create(LookupKind::JobType, "Roofing", png()).await.unwrap();
    let entry = service.create(LookupKind::JobType, "Tiling", png()).await.unwrap();

    let err = service
        .update(LookupKind::JobType, entry.id, Some("roofing"), Some(png()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
    assert!(storage.contains(&entry.image.public_id));
    assert_eq!(storage.len(), 2);
}

#[tokio::test]
async fn test_delete_removes_asset_and_respects_kind() {
    let (service, storage) = service();
    let entry = service.create(LookupKind::JobType, "Fencing", png()).await.unwrap();

    assert_eq!(
        service.delete(LookupKind::ProductType, entry.id).await.unwrap_err(),
        DomainError::not_found("Product type")
    );
    service.delete(LookupKind::JobType, entry.id).await.unwrap();
    assert!(storage.is_empty());
    assert_eq!(
        service.delete(LookupKind::JobType, Uuid::new_v4()).await.unwrap_err(),
        DomainError::not_found("Job type")
    );
}

#[tokio::test]
async fn test_list_is_scoped_by_kind() {
    let (service, _) = service();
    service.create(LookupKind::JobType, "Plumbing", png()).await.unwrap();
    service.create(LookupKind::JobType, "Electrical", png()).await.unwrap();
    service.create(LookupKind::ProductType, "Cement", png()).await.unwrap();

    let jobs = service.list(LookupKind::JobType, &ListQuery::default()).await.unwrap();
    assert_eq!(jobs.total, 2);
    let search = service
        .list(LookupKind::JobType, &ListQuery::default().with_search(Some("elec")))
        .await
        .unwrap();
    assert_eq!(search.total, 1);
    assert_eq!(search.items[0].name, "Electrical");
}
