//! MySQL implementation of the TestimonialRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use bo_core::domain::entities::testimonial::Testimonial;
use bo_core::domain::value_objects::{ImageAsset, ListQuery};
use bo_core::errors::DomainError;
use bo_core::repositories::TestimonialRepository;
use bo_shared::Page;

use crate::database::list::{fetch_page, ListTable};
use crate::database::rows::{col, query_failed, uuid_col};

const COLUMNS: &str =
    "id, name, feedback, rating, image_url, image_public_id, created_at, updated_at";

/// MySQL implementation of TestimonialRepository
pub struct MySqlTestimonialRepository {
    pool: MySqlPool,
}

impl MySqlTestimonialRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_testimonial(row: &sqlx::mysql::MySqlRow) -> Result<Testimonial, DomainError> {
        Ok(Testimonial {
            id: uuid_col(row, "id")?,
            name: col(row, "name")?,
            feedback: col(row, "feedback")?,
            rating: col(row, "rating")?,
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
impl TestimonialRepository for MySqlTestimonialRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Testimonial>, DomainError> {
        let query = format!("SELECT {} FROM testimonials WHERE id = ? LIMIT 1", COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        result.as_ref().map(Self::row_to_testimonial).transpose()
    }

    async fn create(&self, testimonial: Testimonial) -> Result<Testimonial, DomainError> {
        let query = format!(
            "INSERT INTO testimonials ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            COLUMNS
        );

        sqlx::query(&query)
            .bind(testimonial.id.to_string())
            .bind(&testimonial.name)
            .bind(&testimonial.feedback)
            .bind(testimonial.rating)
            .bind(&testimonial.image.url)
            .bind(&testimonial.image.public_id)
            .bind(testimonial.created_at)
            .bind(testimonial.updated_at)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(testimonial)
    }

    async fn update(&self, testimonial: Testimonial) -> Result<Option<Testimonial>, DomainError> {
        let query = r#"
            UPDATE testimonials
            SET name = ?, feedback = ?, rating = ?, image_url = ?, image_public_id = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&testimonial.name)
            .bind(&testimonial.feedback)
            .bind(testimonial.rating)
            .bind(&testimonial.image.url)
            .bind(&testimonial.image.public_id)
            .bind(Utc::now())
            .bind(testimonial.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(testimonial.id).await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Testimonial>, DomainError> {
        let Some(testimonial) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let result = sqlx::query("DELETE FROM testimonials WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok((result.rows_affected() == 1).then_some(testimonial))
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Testimonial>, DomainError> {
        let table = ListTable::new("testimonials", COLUMNS, &["name", "feedback"]);
        fetch_page(&self.pool, &table, query, Self::row_to_testimonial).await
    }
}
