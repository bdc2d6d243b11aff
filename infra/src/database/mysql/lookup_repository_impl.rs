//! MySQL implementation of the LookupRepository trait.
//!
//! Job types and product types share the `lookup_entries` table,
//! partitioned by `kind`. Name uniqueness is case-insensitive through the
//! `name_key` column.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use bo_core::domain::entities::lookup::{LookupEntry, LookupKind};
use bo_core::domain::value_objects::{ImageAsset, ListQuery};
use bo_core::errors::DomainError;
use bo_core::repositories::LookupRepository;
use bo_shared::Page;

use crate::database::list::{fetch_page, ListTable};
use crate::database::rows::{col, query_failed, uuid_col, write_failed};

const COLUMNS: &str = "id, kind, name, image_url, image_public_id, created_at, updated_at";

/// MySQL implementation of LookupRepository
pub struct MySqlLookupRepository {
    pool: MySqlPool,
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn conflict_message(entry: &LookupEntry) -> String {
    format!("{} '{}' already exists", entry.kind.label(), entry.name)
}

impl MySqlLookupRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(kind: LookupKind, row: &sqlx::mysql::MySqlRow) -> Result<LookupEntry, DomainError> {
        Ok(LookupEntry {
            id: uuid_col(row, "id")?,
            kind,
            name: col(row, "name")?,
            image: ImageAsset {
                url: col(row, "image_url")?,
                public_id: col(row, "image_public_id")?,
            },
            created_at: col(row, "created_at")?,
            updated_at: col(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl LookupRepository for MySqlLookupRepository {
    async fn find_by_id(
        &self,
        kind: LookupKind,
        id: Uuid,
    ) -> Result<Option<LookupEntry>, DomainError> {
        let query = format!(
            "SELECT {} FROM lookup_entries WHERE id = ? AND kind = ? LIMIT 1",
            COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        result
            .as_ref()
            .map(|row| Self::row_to_entry(kind, row))
            .transpose()
    }

    async fn create(&self, entry: LookupEntry) -> Result<LookupEntry, DomainError> {
        let query = r#"
            INSERT INTO lookup_entries (
                id, kind, name, name_key, image_url, image_public_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;
        let message = conflict_message(&entry);

        sqlx::query(query)
            .bind(entry.id.to_string())
            .bind(entry.kind.as_str())
            .bind(&entry.name)
            .bind(name_key(&entry.name))
            .bind(&entry.image.url)
            .bind(&entry.image.public_id)
            .bind(entry.created_at)
            .bind(entry.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(e, &[("uq_lookup_kind_name", message.as_str())]))?;

        tracing::info!(kind = %entry.kind, entry_id = %entry.id, "Lookup entry created");
        Ok(entry)
    }

    async fn update(&self, entry: LookupEntry) -> Result<Option<LookupEntry>, DomainError> {
        let query = r#"
            UPDATE lookup_entries
            SET name = ?, name_key = ?, image_url = ?, image_public_id = ?, updated_at = ?
            WHERE id = ? AND kind = ?
        "#;
        let message = conflict_message(&entry);

        let result = sqlx::query(query)
            .bind(&entry.name)
            .bind(name_key(&entry.name))
            .bind(&entry.image.url)
            .bind(&entry.image.public_id)
            .bind(Utc::now())
            .bind(entry.id.to_string())
            .bind(entry.kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(e, &[("uq_lookup_kind_name", message.as_str())]))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(entry.kind, entry.id).await
    }

    async fn delete(
        &self,
        kind: LookupKind,
        id: Uuid,
    ) -> Result<Option<LookupEntry>, DomainError> {
        let Some(entry) = self.find_by_id(kind, id).await? else {
            return Ok(None);
        };

        let result = sqlx::query("DELETE FROM lookup_entries WHERE id = ? AND kind = ?")
            .bind(id.to_string())
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok((result.rows_affected() == 1).then_some(entry))
    }

    async fn list(
        &self,
        kind: LookupKind,
        query: &ListQuery,
    ) -> Result<Page<LookupEntry>, DomainError> {
        let table = ListTable::new("lookup_entries", COLUMNS, &["name"]).scoped("kind", kind.as_str());
        fetch_page(&self.pool, &table, query, |row| Self::row_to_entry(kind, row)).await
    }
}
