//! MySQL implementation of the ContractorRepository trait.
//!
//! Job types are kept as a JSON array in a TEXT column.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use bo_core::domain::entities::contractor::{Contractor, ContractorProfile, RegistrationStep};
use bo_core::domain::value_objects::{ApprovalStatus, ListQuery, ModerationGuard, ModerationState};
use bo_core::errors::DomainError;
use bo_core::repositories::{ContractorRepository, ModerationRepository};
use bo_shared::Page;

use super::moderation::{compare_and_set, moderation_from_row};
use crate::database::list::{fetch_page, ListTable};
use crate::database::rows::{col, query_failed, uuid_col, write_failed};

const COLUMNS: &str = "id, company_name, contractor_name, email, phone, gst_number, job_types, \
     number_of_employees, address, city, state, country, license_document, gst_document, \
     registration_step, approval_status, is_blocked, rejection_reason, reviewed_at, \
     created_at, updated_at";

const UNIQUE_KEYS: &[(&str, &str)] = &[(
    "uq_contractors_email",
    "A contractor with this email already exists",
)];

/// MySQL implementation of ContractorRepository
pub struct MySqlContractorRepository {
    pool: MySqlPool,
}

impl MySqlContractorRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_contractor(row: &sqlx::mysql::MySqlRow) -> Result<Contractor, DomainError> {
        let job_types: String = col(row, "job_types")?;
        let job_types = serde_json::from_str(&job_types).map_err(|e| DomainError::Database {
            message: format!("Invalid job_types: {}", e),
        })?;
        let step: u8 = col(row, "registration_step")?;
        let registration_step =
            RegistrationStep::try_from(step).map_err(|_| DomainError::Database {
                message: format!("Invalid registration step: {}", step),
            })?;

        Ok(Contractor {
            id: uuid_col(row, "id")?,
            profile: ContractorProfile {
                company_name: col(row, "company_name")?,
                contractor_name: col(row, "contractor_name")?,
                email: col(row, "email")?,
                phone: col(row, "phone")?,
                gst_number: col(row, "gst_number")?,
                job_types,
                number_of_employees: col(row, "number_of_employees")?,
                address: col(row, "address")?,
                city: col(row, "city")?,
                state: col(row, "state")?,
                country: col(row, "country")?,
            },
            license_document: col(row, "license_document")?,
            gst_document: col(row, "gst_document")?,
            registration_step,
            moderation: moderation_from_row(row)?,
            created_at: col(row, "created_at")?,
            updated_at: col(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl ModerationRepository<Contractor> for MySqlContractorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contractor>, DomainError> {
        let query = format!("SELECT {} FROM contractors WHERE id = ? LIMIT 1", COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        result.as_ref().map(Self::row_to_contractor).transpose()
    }

    async fn update_moderation(
        &self,
        id: Uuid,
        expected: ModerationGuard,
        next: &ModerationState,
    ) -> Result<Option<Contractor>, DomainError> {
        if !compare_and_set(&self.pool, "contractors", id, expected, next).await? {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}

#[async_trait]
impl ContractorRepository for MySqlContractorRepository {
    async fn create(&self, contractor: Contractor) -> Result<Contractor, DomainError> {
        let job_types = serde_json::to_string(&contractor.profile.job_types)
            .map_err(|e| DomainError::internal(format!("Failed to encode job types: {}", e)))?;
        let query = format!(
            "INSERT INTO contractors ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            COLUMNS
        );
        let profile = &contractor.profile;
        let moderation = &contractor.moderation;

        sqlx::query(&query)
            .bind(contractor.id.to_string())
            .bind(&profile.company_name)
            .bind(&profile.contractor_name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.gst_number)
            .bind(job_types)
            .bind(profile.number_of_employees)
            .bind(&profile.address)
            .bind(&profile.city)
            .bind(&profile.state)
            .bind(&profile.country)
            .bind(&contractor.license_document)
            .bind(&contractor.gst_document)
            .bind(contractor.registration_step.as_u8())
            .bind(moderation.approval_status.as_str())
            .bind(moderation.is_blocked)
            .bind(&moderation.rejection_reason)
            .bind(moderation.reviewed_at)
            .bind(contractor.created_at)
            .bind(contractor.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(e, UNIQUE_KEYS))?;

        tracing::info!(contractor_id = %contractor.id, "Contractor registered");
        Ok(contractor)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Contractor>, DomainError> {
        let table = ListTable::new(
            "contractors",
            COLUMNS,
            &["company_name", "contractor_name", "email", "phone"],
        )
        .moderated()
        .stepped();
        fetch_page(&self.pool, &table, query, Self::row_to_contractor).await
    }

    async fn submit_documents(
        &self,
        id: Uuid,
        license_document: &str,
        gst_document: &str,
    ) -> Result<Option<Contractor>, DomainError> {
        let query = r#"
            UPDATE contractors
            SET license_document = ?, gst_document = ?, registration_step = ?,
                approval_status = ?, rejection_reason = NULL, reviewed_at = NULL,
                updated_at = ?
            WHERE id = ? AND registration_step = ? AND approval_status = ? AND is_blocked = 0
        "#;

        let result = sqlx::query(query)
            .bind(license_document)
            .bind(gst_document)
            .bind(RegistrationStep::Two.as_u8())
            .bind(ApprovalStatus::Pending.as_str())
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(RegistrationStep::One.as_u8())
            .bind(ApprovalStatus::Approved.as_str())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}
