//! Unit tests for the testimonial service

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::{DomainError, ValidationError};
use crate::repositories::InMemoryTestimonialRepository;
use crate::services::storage::{ImageUpload, InMemoryAssetStorage};
use crate::services::testimonial::{NewTestimonial, TestimonialChanges, TestimonialService};

fn service() -> (TestimonialService, Arc<InMemoryAssetStorage>) {
    let storage = Arc::new(InMemoryAssetStorage::new());
    let service = TestimonialService::new(
        Arc::new(InMemoryTestimonialRepository::new()),
        storage.clone(),
        4096,
    );
    (service, storage)
}

fn jpeg() -> ImageUpload {
    ImageUpload {
        file_name: "face.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF],
    }
}

fn input(rating: i64) -> NewTestimonial {
    NewTestimonial {
        name: "Priya".to_string(),
        feedback: "Renovation finished on time.".to_string(),
        rating,
    }
}

#[tokio::test]
async fn test_create_validates_rating() {
    let (service, storage) = service();

    for rating in [0, 6, -1] {
        let err = service.create(input(rating), jpeg()).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::ValidationErr(ValidationError::OutOfRange { .. })
        ));
    }
    assert!(storage.is_empty());

    let created = service.create(input(5), jpeg()).await.unwrap();
    assert_eq!(created.rating, 5);
    assert!(storage.contains(&created.image.public_id));
}

#[tokio::test]
async fn test_partial_update_and_image_swap() {
    let (service, storage) = service();
    let created = service.create(input(4), jpeg()).await.unwrap();

    let updated = service
        .update(
            created.id,
            TestimonialChanges {
                rating: Some(3),
                ..TestimonialChanges::default()
            },
            Some(jpeg()),
        )
        .await
        .unwrap();
    assert_eq!(updated.rating, 3);
    assert_eq!(updated.name, created.name);
    assert!(!storage.contains(&created.image.public_id));
    assert!(storage.contains(&updated.image.public_id));

    let err = service
        .update(
            created.id,
            TestimonialChanges {
                rating: Some(9),
                ..TestimonialChanges::default()
            },
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(_)));
    assert_eq!(service.get(created.id).await.unwrap().rating, 3);
}

#[tokio::test]
async fn test_delete_cleans_up_image() {
    let (service, storage) = service();
    let created = service.create(input(5), jpeg()).await.unwrap();

    service.delete(created.id).await.unwrap();
    assert!(storage.is_empty());
    assert_eq!(
        service.get(created.id).await.unwrap_err(),
        DomainError::not_found("Testimonial")
    );
    assert_eq!(
        service.delete(Uuid::new_v4()).await.unwrap_err(),
        DomainError::not_found("Testimonial")
    );
}
