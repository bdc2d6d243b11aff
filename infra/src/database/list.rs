//! SQL rendition of [`ListQuery`] for the paginated tables.
//!
//! Every listing is `WHERE <scope> AND <filters> AND <search>` ordered
//! newest first with `id` as tie-breaker, the same order the in-memory
//! repositories use.

use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};

use bo_core::domain::value_objects::ListQuery;
use bo_core::errors::DomainError;
use bo_shared::Page;

use super::rows::query_failed;

/// Shape of a listable table
pub(crate) struct ListTable {
    pub table: &'static str,
    pub columns: &'static str,
    pub search_columns: &'static [&'static str],
    pub status_column: Option<&'static str>,
    pub blocked_column: Option<&'static str>,
    pub step_column: Option<&'static str>,
    /// Fixed equality predicate partitioning a shared table
    pub scope: Option<(&'static str, &'static str)>,
}

impl ListTable {
    pub fn new(
        table: &'static str,
        columns: &'static str,
        search_columns: &'static [&'static str],
    ) -> Self {
        Self {
            table,
            columns,
            search_columns,
            status_column: None,
            blocked_column: None,
            step_column: None,
            scope: None,
        }
    }

    pub fn blocked(mut self, column: &'static str) -> Self {
        self.blocked_column = Some(column);
        self
    }

    pub fn moderated(mut self) -> Self {
        self.status_column = Some("approval_status");
        self.blocked_column = Some("is_blocked");
        self
    }

    pub fn stepped(mut self) -> Self {
        self.step_column = Some("registration_step");
        self
    }

    pub fn scoped(mut self, column: &'static str, value: &'static str) -> Self {
        self.scope = Some((column, value));
        self
    }
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_where(builder: &mut QueryBuilder<'_, MySql>, table: &ListTable, query: &ListQuery) {
    builder.push(" WHERE 1 = 1");

    if let Some((column, value)) = table.scope {
        builder.push(format!(" AND {} = ", column)).push_bind(value);
    }

    let filter = &query.filter;
    if let Some(status) = filter.status {
        match table.status_column {
            Some(column) => {
                builder
                    .push(format!(" AND {} = ", column))
                    .push_bind(status.as_str());
            }
            None => {
                builder.push(" AND 1 = 0");
            }
        }
    }
    if let Some(blocked) = filter.blocked {
        match table.blocked_column {
            Some(column) => {
                builder.push(format!(" AND {} = ", column)).push_bind(blocked);
            }
            None => {
                builder.push(" AND 1 = 0");
            }
        }
    }
    if let Some(step) = filter.registration_step {
        match table.step_column {
            Some(column) => {
                builder.push(format!(" AND {} = ", column)).push_bind(step);
            }
            None => {
                builder.push(" AND 1 = 0");
            }
        }
    }
    if let Some(from) = filter.from {
        builder.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(to) = filter.to {
        builder.push(" AND created_at <= ").push_bind(to);
    }

    if let Some(term) = query.search_lower() {
        let pattern = format!("%{}%", escape_like(&term));
        builder.push(" AND (");
        for (i, column) in table.search_columns.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder
                .push(format!("LOWER({}) LIKE ", column))
                .push_bind(pattern.clone());
        }
        builder.push(")");
    }
}

pub(crate) fn count_query<'a>(table: &ListTable, query: &ListQuery) -> QueryBuilder<'a, MySql> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) AS total FROM {}", table.table));
    push_where(&mut builder, table, query);
    builder
}

pub(crate) fn page_query<'a>(table: &ListTable, query: &ListQuery) -> QueryBuilder<'a, MySql> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", table.columns, table.table));
    push_where(&mut builder, table, query);
    builder
        .push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(query.pagination.limit_i64())
        .push(" OFFSET ")
        .push_bind(query.pagination.offset_i64());
    builder
}

/// Run the count and page queries and map each row
pub(crate) async fn fetch_page<T, F>(
    pool: &MySqlPool,
    table: &ListTable,
    query: &ListQuery,
    map: F,
) -> Result<Page<T>, DomainError>
where
    F: Fn(&MySqlRow) -> Result<T, DomainError>,
{
    let total: i64 = count_query(table, query)
        .build()
        .fetch_one(pool)
        .await
        .map_err(query_failed)?
        .try_get("total")
        .map_err(query_failed)?;

    let rows = page_query(table, query)
        .build()
        .fetch_all(pool)
        .await
        .map_err(query_failed)?;

    let items = rows.iter().map(map).collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(table = table.table, %query, total, "Listed page");
    Ok(Page::new(items, query.pagination, total.max(0) as u64))
}
