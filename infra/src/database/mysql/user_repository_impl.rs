//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use bo_core::domain::entities::user::User;
use bo_core::domain::value_objects::ListQuery;
use bo_core::errors::DomainError;
use bo_core::repositories::UserRepository;
use bo_shared::Page;

use crate::database::list::{fetch_page, ListTable};
use crate::database::rows::{col, query_failed, uuid_col, write_failed};

const COLUMNS: &str =
    "id, name, email, phone, password_hash, is_blocked, created_at, updated_at";

const UNIQUE_KEYS: &[(&str, &str)] = &[("uq_users_email", "A user with this email already exists")];

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: uuid_col(row, "id")?,
            name: col(row, "name")?,
            email: col(row, "email")?,
            phone: col(row, "phone")?,
            password_hash: col(row, "password_hash")?,
            is_blocked: col(row, "is_blocked")?,
            created_at: col(row, "created_at")?,
            updated_at: col(row, "updated_at")?,
        })
    }

    async fn fetch_one_by(&self, column: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", COLUMNS, column);

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        result.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_one_by("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_by("email", email.to_string()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, phone, password_hash,
                is_blocked, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.password_hash)
            .bind(user.is_blocked)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(e, UNIQUE_KEYS))?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        phone: &str,
    ) -> Result<Option<User>, DomainError> {
        let result = sqlx::query(
            "UPDATE users SET name = ?, phone = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(phone)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<Option<User>, DomainError> {
        let result = sqlx::query(
            "UPDATE users SET is_blocked = ?, updated_at = ? WHERE id = ? AND is_blocked = ?",
        )
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

    async fn list(&self, query: &ListQuery) -> Result<Page<User>, DomainError> {
        let table = ListTable::new("users", COLUMNS, &["name", "email", "phone"]).blocked("is_blocked");
        fetch_page(&self.pool, &table, query, Self::row_to_user).await
    }
}
