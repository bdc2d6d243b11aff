//! Listing query model shared by every paginated table.
//!
//! Repositories backed by a database translate [`ListQuery`] into SQL;
//! in-memory repositories run it through [`paginate`].

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use bo_shared::utils::normalize_search;
use bo_shared::{Page, Pagination};

use super::moderation::ApprovalStatus;

/// Predicates ANDed with the search term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub status: Option<ApprovalStatus>,
    pub blocked: Option<bool>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub registration_step: Option<u8>,
}

impl ListFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_status(mut self, status: ApprovalStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_step(mut self, step: u8) -> Self {
        self.registration_step = Some(step);
        self
    }

    /// Records lacking a filtered attribute never match
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        if let Some(status) = self.status {
            if item.approval_status() != Some(status) {
                return false;
            }
        }
        if let Some(blocked) = self.blocked {
            if item.is_blocked() != Some(blocked) {
                return false;
            }
        }
        if let Some(step) = self.registration_step {
            if item.registration_step() != Some(step) {
                return false;
            }
        }
        let created = item.created_at();
        if self.from.map_or(false, |from| created < from) {
            return false;
        }
        if self.to.map_or(false, |to| created > to) {
            return false;
        }
        true
    }
}

/// A page request with optional search and filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub pagination: Pagination,
    search: Option<String>,
    pub filter: ListFilter,
}

impl ListQuery {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            ..Self::default()
        }
    }

    pub fn page(page: u32, limit: u32) -> Self {
        Self::new(Pagination::new(page, limit))
    }

    /// Blank terms are dropped, so `""` and `"   "` mean "no search"
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = normalize_search(search);
        self
    }

    pub fn with_filter(mut self, filter: ListFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Lower-cased term for case-insensitive matching
    pub fn search_lower(&self) -> Option<String> {
        self.search.as_ref().map(|s| s.to_lowercase())
    }
}

impl fmt::Display for ListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page={} limit={}", self.pagination.page, self.pagination.limit)?;
        if let Some(search) = &self.search {
            write!(f, " search={:?}", search)?;
        }
        Ok(())
    }
}

/// Records that can appear in a listing
pub trait Listable {
    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Fields the free-text search looks into
    fn search_fields(&self) -> Vec<&str>;

    fn approval_status(&self) -> Option<ApprovalStatus> {
        None
    }

    fn is_blocked(&self) -> Option<bool> {
        None
    }

    fn registration_step(&self) -> Option<u8> {
        None
    }
}

fn matches_search<T: Listable>(item: &T, term: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

/// Filter, sort (newest first, ties by id) and slice a collection
pub fn paginate<'a, T, I>(items: I, query: &ListQuery) -> Page<T>
where
    T: Listable + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let term = query.search_lower();
    let mut matched: Vec<&T> = items
        .into_iter()
        .filter(|item| query.filter.matches(*item))
        .filter(|item| term.as_deref().map_or(true, |t| matches_search(*item, t)))
        .collect();

    matched.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });

    let total = matched.len() as u64;
    let pagination = query.pagination;
    let page_items = matched
        .into_iter()
        .skip(pagination.skip() as usize)
        .take(pagination.limit as usize)
        .cloned()
        .collect();

    Page::new(page_items, pagination, total)
}
