//! Query string shared by every listing endpoint

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use validator::Validate;

use bo_core::domain::value_objects::{ApprovalStatus, ListFilter, ListQuery};
use bo_core::errors::{DomainError, ValidationError};
use bo_shared::{Page, Pagination};

/// `?page&limit&search&filter&from&to&seq`
///
/// `filter` is a single dashboard keyword: an approval status
/// (`pending`, `approved`, `rejected`), `blocked`, `active`, or `all`.
/// `status` and `blocked` may also be given explicitly.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[validate(length(max = 100, message = "Search must be at most 100 characters"))]
    pub search: Option<String>,
    pub filter: Option<String>,
    pub status: Option<String>,
    pub blocked: Option<bool>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (start of day)
    pub from: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (end of day)
    pub to: Option<String>,
    /// Client sequence number echoed back in the page
    pub seq: Option<u64>,
}

impl ListParams {
    pub fn pagination(&self) -> Pagination {
        let clamp = |value: i64| value.clamp(0, i64::from(u32::MAX)) as u32;
        Pagination::from_query(self.page.map(clamp), self.limit.map(clamp))
    }

    /// Build the listing query; unknown filter keywords are a validation error
    pub fn to_query(&self) -> Result<ListQuery, DomainError> {
        let mut filter = ListFilter::default();

        match self.filter.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            None => {}
            Some(keyword) => match keyword.to_ascii_lowercase().as_str() {
                "all" => {}
                "blocked" => filter.blocked = Some(true),
                "active" | "unblocked" => filter.blocked = Some(false),
                other => filter.status = Some(other.parse::<ApprovalStatus>().map_err(|_| {
                    DomainError::from(ValidationError::InvalidFormat {
                        field: "filter".to_string(),
                    })
                })?),
            },
        }

        if let Some(status) = self.status.as_deref().filter(|s| !s.trim().is_empty()) {
            filter.status = Some(status.parse()?);
        }
        if let Some(blocked) = self.blocked {
            filter.blocked = Some(blocked);
        }
        filter.from = self
            .from
            .as_deref()
            .map(|value| parse_bound("from", value, NaiveTime::default()))
            .transpose()?;
        filter.to = self
            .to
            .as_deref()
            .map(|value| parse_bound("to", value, end_of_day()))
            .transpose()?;

        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(ValidationError::InvalidFormat {
                    field: "from".to_string(),
                }
                .into());
            }
        }

        Ok(ListQuery::new(self.pagination())
            .with_search(self.search.as_deref())
            .with_filter(filter))
    }

    /// Attach the client's sequence number to a result page
    pub fn stamp<T>(&self, page: Page<T>) -> Page<T> {
        page.with_seq(self.seq)
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or_default()
}

fn parse_bound(field: &str, value: &str, time: NaiveTime) -> Result<DateTime<Utc>, DomainError> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| Utc.from_utc_datetime(&date.and_time(time)))
        .map_err(|_| {
            ValidationError::InvalidFormat {
                field: field.to_string(),
            }
            .into()
        })
}
