//! MySQL implementation of the StoreRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;
use uuid::Uuid;

use bo_core::domain::entities::store::{Store, StoreProfile};
use bo_core::domain::value_objects::{ListQuery, ModerationGuard, ModerationState};
use bo_core::errors::DomainError;
use bo_core::repositories::{ModerationRepository, StoreRepository};
use bo_shared::Page;

use super::moderation::{compare_and_set, moderation_from_row};
use crate::database::list::{fetch_page, ListTable};
use crate::database::rows::{col, query_failed, uuid_col, write_failed};

const COLUMNS: &str = "id, store_name, owner_name, email, phone, address, city, state, country, \
     gst_number, store_license, gst_document, approval_status, is_blocked, rejection_reason, \
     reviewed_at, created_at, updated_at";

const UNIQUE_KEYS: &[(&str, &str)] =
    &[("uq_stores_email", "A store with this email already exists")];

/// MySQL implementation of StoreRepository
pub struct MySqlStoreRepository {
    pool: MySqlPool,
}

impl MySqlStoreRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_store(row: &sqlx::mysql::MySqlRow) -> Result<Store, DomainError> {
        Ok(Store {
            id: uuid_col(row, "id")?,
            profile: StoreProfile {
                store_name: col(row, "store_name")?,
                owner_name: col(row, "owner_name")?,
                email: col(row, "email")?,
                phone: col(row, "phone")?,
                address: col(row, "address")?,
                city: col(row, "city")?,
                state: col(row, "state")?,
                country: col(row, "country")?,
                gst_number: col(row, "gst_number")?,
                store_license: col(row, "store_license")?,
                gst_document: col(row, "gst_document")?,
            },
            moderation: moderation_from_row(row)?,
            created_at: col(row, "created_at")?,
            updated_at: col(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl ModerationRepository<Store> for MySqlStoreRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, DomainError> {
        let query = format!("SELECT {} FROM stores WHERE id = ? LIMIT 1", COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        result.as_ref().map(Self::row_to_store).transpose()
    }

    async fn update_moderation(
        &self,
        id: Uuid,
        expected: ModerationGuard,
        next: &ModerationState,
    ) -> Result<Option<Store>, DomainError> {
        if !compare_and_set(&self.pool, "stores", id, expected, next).await? {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}

#[async_trait]
impl StoreRepository for MySqlStoreRepository {
    async fn create(&self, store: Store) -> Result<Store, DomainError> {
        let query = format!(
            "INSERT INTO stores ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            COLUMNS
        );
        let profile = &store.profile;
        let moderation = &store.moderation;

        sqlx::query(&query)
            .bind(store.id.to_string())
            .bind(&profile.store_name)
            .bind(&profile.owner_name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.address)
            .bind(&profile.city)
            .bind(&profile.state)
            .bind(&profile.country)
            .bind(&profile.gst_number)
            .bind(&profile.store_license)
            .bind(&profile.gst_document)
            .bind(moderation.approval_status.as_str())
            .bind(moderation.is_blocked)
            .bind(&moderation.rejection_reason)
            .bind(moderation.reviewed_at)
            .bind(store.created_at)
            .bind(store.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(e, UNIQUE_KEYS))?;

        tracing::info!(store_id = %store.id, "Store registered");
        Ok(store)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Store>, DomainError> {
        let table = ListTable::new(
            "stores",
            COLUMNS,
            &["store_name", "owner_name", "email", "phone"],
        )
        .moderated();
        fetch_page(&self.pool, &table, query, Self::row_to_store).await
    }
}
