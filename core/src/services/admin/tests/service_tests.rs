//! Unit tests for the admin service

use std::sync::Arc;

use uuid::Uuid;

use bo_shared::BootstrapConfig;

use crate::domain::entities::admin::{Admin, AdminRole};
use crate::domain::events::NotificationEvent;
use crate::domain::value_objects::ListQuery;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{AdminRepository, InMemoryAdminRepository};
use crate::services::admin::{AdminChanges, AdminService, NewAdmin};
use crate::services::notification::RecordingPublisher;
use crate::services::testing::PlainHasher;
use crate::services::token::{TokenService, TokenServiceConfig};

struct Fixture {
    repo: Arc<InMemoryAdminRepository>,
    tokens: Arc<TokenService>,
    events: Arc<RecordingPublisher>,
    service: AdminService,
    root: Admin,
}

async fn fixture() -> Fixture {
    let repo = Arc::new(InMemoryAdminRepository::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "admin-tests-secret-value".to_string(),
        ..TokenServiceConfig::default()
    }));
    let events = Arc::new(RecordingPublisher::new());
    let service = AdminService::new(
        repo.clone(),
        tokens.clone(),
        Arc::new(PlainHasher),
        events.clone(),
        "https://dashboard.test/set-password",
    );
    let root = repo
        .create(Admin::new(
            "Root".to_string(),
            "root@example.com".to_string(),
            "ROOT".to_string(),
            AdminRole::Superadmin,
            Some("plain:root-password".to_string()),
        ))
        .await
        .unwrap();
    Fixture {
        repo,
        tokens,
        events,
        service,
        root,
    }
}

fn new_admin(email: &str, unique_id: &str) -> NewAdmin {
    NewAdmin {
        fullname: "Staff Member".to_string(),
        email: email.to_string(),
        password: None,
        role: AdminRole::Admin,
        unique_id: unique_id.to_string(),
    }
}

#[tokio::test]
async fn test_add_admin_sends_setup_link() {
    let fx = fixture().await;
    let admin = fx
        .service
        .add_admin(&fx.root, new_admin("Staff@Example.com", "EMP-1"))
        .await
        .unwrap();
    assert_eq!(admin.email, "staff@example.com");
    assert!(!admin.has_password());

    let events = fx.events.events();
    assert_eq!(events.len(), 1);
    let NotificationEvent::AdminInvited { recipient, setup_url } = &events[0] else {
        panic!("expected an invite, got {:?}", events[0]);
    };
    assert_eq!(recipient.email, "staff@example.com");
    let token = setup_url
        .strip_prefix("https://dashboard.test/set-password?token=")
        .unwrap();
    let claims = fx.tokens.verify_password_setup(token).unwrap();
    assert_eq!(claims.admin_id().unwrap(), admin.id);
}

#[tokio::test]
async fn test_duplicate_email_leaves_count_unchanged() {
    let fx = fixture().await;
    fx.service
        .add_admin(&fx.root, new_admin("a@example.com", "EMP-1"))
        .await
        .unwrap();
    let before = fx.repo.count().await.unwrap();

    let err = fx
        .service
        .add_admin(&fx.root, new_admin("A@example.com", "EMP-2"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
    let err = fx
        .service
        .add_admin(&fx.root, new_admin("b@example.com", "EMP-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    assert_eq!(fx.repo.count().await.unwrap(), before);
}

#[tokio::test]
async fn test_only_superadmin_creates_superadmin() {
    let fx = fixture().await;
    let staff = fx
        .service
        .add_admin(&fx.root, new_admin("s@example.com", "EMP-1"))
        .await
        .unwrap();

    let err = fx
        .service
        .add_admin(
            &staff,
            NewAdmin {
                role: AdminRole::Superadmin,
                ..new_admin("x@example.com", "EMP-2")
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InsufficientPermissions));
}

#[tokio::test]
async fn test_edit_admin_rules() {
    let fx = fixture().await;
    let staff = fx
        .service
        .add_admin(&fx.root, new_admin("s@example.com", "EMP-1"))
        .await
        .unwrap();
    let other = fx
        .service
        .add_admin(&fx.root, new_admin("o@example.com", "EMP-2"))
        .await
        .unwrap();

    let err = fx
        .service
        .edit_admin(
            &staff,
            other.id,
            AdminChanges {
                email: Some("changed@example.com".to_string()),
                ..AdminChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::ImmutableField { .. })
    ));

    let err = fx
        .service
        .edit_admin(
            &staff,
            other.id,
            AdminChanges {
                role: Some(AdminRole::Superadmin),
                ..AdminChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InsufficientPermissions));

    let err = fx
        .service
        .edit_admin(&staff, fx.root.id, AdminChanges::default())
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InsufficientPermissions));

    let edited = fx
        .service
        .edit_admin(
            &fx.root,
            other.id,
            AdminChanges {
                fullname: Some("Renamed".to_string()),
                role: Some(AdminRole::Superadmin),
                password: Some("fresh-password".to_string()),
                email: Some("O@example.com".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.fullname, "Renamed");
    assert_eq!(edited.role, AdminRole::Superadmin);
    assert_eq!(edited.password_hash.as_deref(), Some("plain:fresh-password"));
}

#[tokio::test]
async fn test_edit_without_password_keeps_stored_hash() {
    let fx = fixture().await;
    let invited = fx
        .service
        .add_admin(&fx.root, new_admin("inv@example.com", "EMP-9"))
        .await
        .unwrap();
    assert!(fx
        .repo
        .replace_password(invited.id, None, "plain:chosen-password")
        .await
        .unwrap());

    let edited = fx
        .service
        .edit_admin(
            &fx.root,
            invited.id,
            AdminChanges {
                fullname: Some("Invited Person".to_string()),
                ..AdminChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.fullname, "Invited Person");
    assert_eq!(edited.password_hash.as_deref(), Some("plain:chosen-password"));

    // A no-op edit returns the admin untouched
    let same = fx
        .service
        .edit_admin(&fx.root, invited.id, AdminChanges::default())
        .await
        .unwrap();
    assert_eq!(same, edited);
}

#[tokio::test]
async fn test_block_unblock_round_trip_is_idempotent() {
    let fx = fixture().await;
    let staff = fx
        .service
        .add_admin(&fx.root, new_admin("s@example.com", "EMP-1"))
        .await
        .unwrap();
    fx.events.clear();

    assert!(fx.service.block_admin(&fx.root, staff.id).await.unwrap().is_blocked);
    assert!(!fx.service.unblock_admin(staff.id).await.unwrap().is_blocked);
    assert!(!fx.service.unblock_admin(staff.id).await.unwrap().is_blocked);

    assert_eq!(fx.events.count(), 2);
}

#[tokio::test]
async fn test_superadmin_cannot_be_blocked_or_deleted() {
    let fx = fixture().await;
    let other_root = fx
        .service
        .add_admin(
            &fx.root,
            NewAdmin {
                role: AdminRole::Superadmin,
                ..new_admin("r2@example.com", "ROOT-2")
            },
        )
        .await
        .unwrap();

    assert!(matches!(
        fx.service.block_admin(&fx.root, other_root.id).await.unwrap_err(),
        DomainError::Auth(AuthError::SuperadminProtected { .. })
    ));
    assert!(matches!(
        fx.service.delete_admin(&fx.root, other_root.id).await.unwrap_err(),
        DomainError::Auth(AuthError::SuperadminProtected { .. })
    ));
    assert_eq!(fx.service.get(other_root.id).await.unwrap(), other_root);
}

#[tokio::test]
async fn test_delete_admin() {
    let fx = fixture().await;
    let staff = fx
        .service
        .add_admin(&fx.root, new_admin("s@example.com", "EMP-1"))
        .await
        .unwrap();

    fx.service.delete_admin(&fx.root, staff.id).await.unwrap();
    assert_eq!(
        fx.service.delete_admin(&fx.root, staff.id).await.unwrap_err(),
        DomainError::not_found("Admin")
    );
    assert_eq!(
        fx.service.delete_admin(&fx.root, Uuid::new_v4()).await.unwrap_err(),
        DomainError::not_found("Admin")
    );
}

#[tokio::test]
async fn test_list_pages_through_admins() {
    let fx = fixture().await;
    for i in 0..14 {
        fx.service
            .add_admin(&fx.root, new_admin(&format!("s{}@example.com", i), &format!("EMP-{}", i)))
            .await
            .unwrap();
    }

    let first = fx.service.list(&ListQuery::page(1, 10)).await.unwrap();
    let second = fx.service.list(&ListQuery::page(2, 10)).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert!(first.has_more);
    assert_eq!(second.items.len(), 5);
    assert!(!second.has_more);
    assert_eq!(second.total, 15);
}

#[tokio::test]
async fn test_bootstrap_only_when_empty() {
    let repo = Arc::new(InMemoryAdminRepository::new());
    let service = AdminService::new(
        repo.clone(),
        Arc::new(TokenService::new(TokenServiceConfig::default())),
        Arc::new(PlainHasher),
        Arc::new(RecordingPublisher::new()),
        "https://dashboard.test/set-password",
    );
    let config = BootstrapConfig {
        fullname: "First Admin".to_string(),
        email: "first@example.com".to_string(),
        password: "bootstrap-password".to_string(),
        unique_id: "ROOT".to_string(),
    };

    let created = service.bootstrap(&config).await.unwrap().unwrap();
    assert!(created.is_superadmin());
    assert!(created.has_password());
    assert!(service.bootstrap(&config).await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 1);
}
