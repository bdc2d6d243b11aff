//! MySQL implementation of the AdminRepository trait.
//!
//! Emails arrive already normalized. Edits, block toggles, password
//! replacement and deletion are single conditional statements, so concurrent requests
//! cannot both succeed.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use bo_core::domain::entities::admin::{Admin, AdminRole, AdminUpdate};
use bo_core::domain::value_objects::ListQuery;
use bo_core::errors::DomainError;
use bo_core::repositories::AdminRepository;
use bo_shared::Page;

use crate::database::list::{fetch_page, ListTable};
use crate::database::rows::{col, query_failed, uuid_col, write_failed};

const COLUMNS: &str =
    "id, fullname, email, password_hash, role, is_blocked, unique_id, created_at, updated_at";

const UNIQUE_KEYS: &[(&str, &str)] = &[
    ("uq_admins_email", "An admin with this email already exists"),
    ("uq_admins_unique_id", "An admin with this unique ID already exists"),
];

/// MySQL implementation of AdminRepository
pub struct MySqlAdminRepository {
    pool: MySqlPool,
}

impl MySqlAdminRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn table() -> ListTable {
        ListTable::new("admins", COLUMNS, &["fullname", "email", "unique_id"]).blocked("is_blocked")
    }

    /// Convert database row to Admin entity
    fn row_to_admin(row: &sqlx::mysql::MySqlRow) -> Result<Admin, DomainError> {
        let role: String = col(row, "role")?;
        let role = role.parse::<AdminRole>().map_err(|_| DomainError::Database {
            message: format!("Unknown admin role: {}", role),
        })?;

        Ok(Admin {
            id: uuid_col(row, "id")?,
            fullname: col(row, "fullname")?,
            email: col(row, "email")?,
            password_hash: col(row, "password_hash")?,
            role,
            is_blocked: col(row, "is_blocked")?,
            unique_id: col(row, "unique_id")?,
            created_at: col(row, "created_at")?,
            updated_at: col(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl AdminRepository for MySqlAdminRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, DomainError> {
        let query = format!("SELECT {} FROM admins WHERE id = ? LIMIT 1", COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        result.as_ref().map(Self::row_to_admin).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        let query = format!("SELECT {} FROM admins WHERE email = ? LIMIT 1", COLUMNS);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        result.as_ref().map(Self::row_to_admin).transpose()
    }

    async fn create(&self, admin: Admin) -> Result<Admin, DomainError> {
        let query = r#"
            INSERT INTO admins (
                id, fullname, email, password_hash, role,
                is_blocked, unique_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(admin.id.to_string())
            .bind(&admin.fullname)
            .bind(&admin.email)
            .bind(&admin.password_hash)
            .bind(admin.role.as_str())
            .bind(admin.is_blocked)
            .bind(&admin.unique_id)
            .bind(admin.created_at)
            .bind(admin.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(e, UNIQUE_KEYS))?;

        tracing::info!(admin_id = %admin.id, role = %admin.role, "Admin created");
        Ok(admin)
    }

    async fn update(
        &self,
        id: Uuid,
        expected_role: AdminRole,
        changes: AdminUpdate,
    ) -> Result<Option<Admin>, DomainError> {
        // NULL binds keep the stored column
        let query = r#"
            UPDATE admins
            SET fullname = COALESCE(?, fullname),
                role = COALESCE(?, role),
                password_hash = COALESCE(?, password_hash),
                updated_at = ?
            WHERE id = ? AND role = ?
        "#;

        let result = sqlx::query(query)
            .bind(changes.fullname)
            .bind(changes.role.map(|r| r.as_str()))
            .bind(changes.password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(expected_role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(e, UNIQUE_KEYS))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<Option<Admin>, DomainError> {
        let query = r#"
            UPDATE admins
            SET is_blocked = ?, updated_at = ?
            WHERE id = ? AND is_blocked = ?
        "#;

        let result = sqlx::query(query)
            .bind(blocked)
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(!blocked)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn replace_password(
        &self,
        id: Uuid,
        expected: Option<&str>,
        new_hash: &str,
    ) -> Result<bool, DomainError> {
        // `<=>` is NULL-safe, so a never-set password matches `expected = None`
        let query = r#"
            UPDATE admins
            SET password_hash = ?, updated_at = ?
            WHERE id = ? AND password_hash <=> ?
        "#;

        let result = sqlx::query(query)
            .bind(new_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(expected)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = ? AND role <> ?")
            .bind(id.to_string())
            .bind(AdminRole::Superadmin.as_str())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected() == 1)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Admin>, DomainError> {
        fetch_page(&self.pool, &Self::table(), query, Self::row_to_admin).await
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM admins")
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed)?;

        let total: i64 = row.try_get("total").map_err(query_failed)?;
        Ok(total.max(0) as u64)
    }
}
