//! Column decoding and error mapping shared by the MySQL repositories.

use sqlx::mysql::MySqlRow;
use sqlx::{Decode, MySql, Row, Type};
use uuid::Uuid;

use bo_core::errors::DomainError;

/// Read a column, mapping decode failures to `DomainError::Database`
pub(crate) fn col<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Database {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// UUIDs are stored as CHAR(36)
pub(crate) fn uuid_col(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = col(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::Database {
        message: format!("Invalid UUID in {}: {}", name, e),
    })
}

pub(crate) fn query_failed(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "Database query failed");
    DomainError::Database {
        message: format!("Database query failed: {}", e),
    }
}

/// Map a failed INSERT/UPDATE, turning unique-key violations into `Conflict`.
///
/// `keys` pairs a unique index name with the message to report for it;
/// MySQL names the violated key in the error text.
pub(crate) fn write_failed(e: sqlx::Error, keys: &[(&str, &str)]) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            let text = db.message();
            let message = keys
                .iter()
                .find(|(key, _)| text.contains(key))
                .or_else(|| keys.first())
                .map(|(_, message)| *message)
                .unwrap_or("Record already exists");
            return DomainError::conflict(message);
        }
    }
    query_failed(e)
}
