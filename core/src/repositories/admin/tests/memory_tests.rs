//! Tests for InMemoryAdminRepository

use crate::domain::entities::admin::{Admin, AdminRole, AdminUpdate};
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;
use crate::repositories::admin::{AdminRepository, InMemoryAdminRepository};

fn admin(name: &str, email: &str, unique_id: &str, role: AdminRole) -> Admin {
    Admin::new(
        name.to_string(),
        email.to_string(),
        unique_id.to_string(),
        role,
        None,
    )
}

#[tokio::test]
async fn test_duplicate_email_or_unique_id_conflicts() {
    let repo = InMemoryAdminRepository::new();
    repo.create(admin("A", "a@example.com", "ADM-1", AdminRole::Admin))
        .await
        .unwrap();

    let dup_email = repo
        .create(admin("B", "a@example.com", "ADM-2", AdminRole::Admin))
        .await;
    assert!(matches!(dup_email, Err(DomainError::Conflict { .. })));

    let dup_uid = repo
        .create(admin("C", "c@example.com", "ADM-1", AdminRole::Admin))
        .await;
    assert!(matches!(dup_uid, Err(DomainError::Conflict { .. })));

    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_set_blocked_only_flips_once() {
    let repo = InMemoryAdminRepository::new();
    let created = repo
        .create(admin("A", "a@example.com", "ADM-1", AdminRole::Admin))
        .await
        .unwrap();

    assert!(repo.set_blocked(created.id, true).await.unwrap().is_some());
    assert!(repo.set_blocked(created.id, true).await.unwrap().is_none());
    let unblocked = repo.set_blocked(created.id, false).await.unwrap().unwrap();
    assert!(!unblocked.is_blocked);
}

#[tokio::test]
async fn test_replace_password_is_conditional() {
    let repo = InMemoryAdminRepository::new();
    let created = repo
        .create(admin("A", "a@example.com", "ADM-1", AdminRole::Admin))
        .await
        .unwrap();

    assert!(repo.replace_password(created.id, None, "hash-1").await.unwrap());
    // A second writer holding the stale view loses
    assert!(!repo.replace_password(created.id, None, "hash-2").await.unwrap());

    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash.as_deref(), Some("hash-1"));
}

#[tokio::test]
async fn test_update_writes_only_given_fields() {
    let repo = InMemoryAdminRepository::new();
    let read = repo
        .create(admin("A", "a@example.com", "ADM-1", AdminRole::Admin))
        .await
        .unwrap();

    // Password set through the setup link after the edit read the row
    assert!(repo.replace_password(read.id, None, "hash-1").await.unwrap());

    let changes = AdminUpdate {
        fullname: Some("Renamed".to_string()),
        ..AdminUpdate::default()
    };
    let updated = repo
        .update(read.id, read.role, changes)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.fullname, "Renamed");
    assert_eq!(updated.password_hash.as_deref(), Some("hash-1"));
}

#[tokio::test]
async fn test_update_requires_role_unchanged() {
    let repo = InMemoryAdminRepository::new();
    let read = repo
        .create(admin("A", "a@example.com", "ADM-1", AdminRole::Admin))
        .await
        .unwrap();

    let promote = AdminUpdate {
        role: Some(AdminRole::Superadmin),
        ..AdminUpdate::default()
    };
    repo.update(read.id, AdminRole::Admin, promote).await.unwrap().unwrap();

    // A writer still holding the Admin view must not demote
    let demote = AdminUpdate {
        role: Some(AdminRole::Admin),
        ..AdminUpdate::default()
    };
    assert!(repo.update(read.id, read.role, demote).await.unwrap().is_none());

    let stored = repo.find_by_id(read.id).await.unwrap().unwrap();
    assert_eq!(stored.role, AdminRole::Superadmin);
}

#[tokio::test]
async fn test_delete_spares_superadmin() {
    let repo = InMemoryAdminRepository::new();
    let root = repo
        .create(admin("Root", "root@example.com", "SUPER-001", AdminRole::Superadmin))
        .await
        .unwrap();
    let staff = repo
        .create(admin("Staff", "staff@example.com", "ADM-2", AdminRole::Admin))
        .await
        .unwrap();

    assert!(!repo.delete(root.id).await.unwrap());
    assert!(repo.delete(staff.id).await.unwrap());
    assert!(repo.find_by_id(root.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_list_searches_unique_id() {
    let repo = InMemoryAdminRepository::new();
    for i in 0..12 {
        repo.create(admin(
            &format!("Admin {}", i),
            &format!("admin{}@example.com", i),
            &format!("ADM-{:03}", i),
            AdminRole::Admin,
        ))
        .await
        .unwrap();
    }

    let page = repo
        .list(&ListQuery::page(1, 5).with_search(Some("adm-007")))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].unique_id, "ADM-007");
}
