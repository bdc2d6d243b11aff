//! Conditional moderation writes shared by contractors and stores.

use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use bo_core::domain::value_objects::{ApprovalStatus, ModerationGuard, ModerationState};
use bo_core::errors::DomainError;

use crate::database::rows::{col, query_failed};

/// Persist `next` only while the row still matches `expected`.
///
/// # Returns
/// * `Ok(true)` - Exactly one row moved to `next`
/// * `Ok(false)` - The row is gone or no longer in the expected state
pub(super) async fn compare_and_set(
    pool: &MySqlPool,
    table: &str,
    id: Uuid,
    expected: ModerationGuard,
    next: &ModerationState,
) -> Result<bool, DomainError> {
    let mut builder: QueryBuilder<'_, MySql> =
        QueryBuilder::new(format!("UPDATE {} SET approval_status = ", table));
    builder
        .push_bind(next.approval_status.as_str())
        .push(", is_blocked = ")
        .push_bind(next.is_blocked)
        .push(", rejection_reason = ")
        .push_bind(next.rejection_reason.clone())
        .push(", reviewed_at = ")
        .push_bind(next.reviewed_at)
        .push(", updated_at = ")
        .push_bind(Utc::now())
        .push(" WHERE id = ")
        .push_bind(id.to_string())
        .push(" AND approval_status = ")
        .push_bind(expected.approval_status.as_str())
        .push(" AND is_blocked = ")
        .push_bind(expected.is_blocked)
        .push(" AND reviewed_at <=> ")
        .push_bind(expected.reviewed_at);
    if let Some(step) = expected.registration_step {
        builder.push(" AND registration_step = ").push_bind(step);
    }

    let result = builder
        .build()
        .execute(pool)
        .await
        .map_err(query_failed)?;

    Ok(result.rows_affected() == 1)
}

/// Decode the moderation columns of a contractor or store row
pub(super) fn moderation_from_row(row: &MySqlRow) -> Result<ModerationState, DomainError> {
    let status: String = col(row, "approval_status")?;
    let approval_status = status
        .parse::<ApprovalStatus>()
        .map_err(|_| DomainError::Database {
            message: format!("Unknown approval status: {}", status),
        })?;

    Ok(ModerationState {
        approval_status,
        is_blocked: col(row, "is_blocked")?,
        rejection_reason: col(row, "rejection_reason")?,
        reviewed_at: col(row, "reviewed_at")?,
    })
}
