//! In-memory table backing the `InMemory*Repository` types.
//!
//! Every mutation happens under a single write lock, which makes the
//! uniqueness checks and conditional updates atomic.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::value_objects::{paginate, ListQuery, Listable};
use crate::errors::DomainError;

pub(crate) struct MemoryTable<T> {
    rows: RwLock<HashMap<Uuid, T>>,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> MemoryTable<T>
where
    T: Listable + Clone + Send + Sync,
{
    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.read().await.values().find(|row| predicate(*row)).cloned()
    }

    pub async fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.rows.read().await.values().any(predicate)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Insert unless `conflict` reports a clash with an existing row
    pub async fn insert_unique<F>(&self, item: T, conflict: F) -> Result<T, DomainError>
    where
        F: Fn(&T, &T) -> Option<DomainError>,
    {
        let mut rows = self.rows.write().await;
        if let Some(err) = rows.values().find_map(|existing| conflict(existing, &item)) {
            return Err(err);
        }
        rows.insert(item.id(), item.clone());
        Ok(item)
    }

    /// Replace an existing row, checking `conflict` against every other row
    pub async fn replace_unique<F>(&self, item: T, conflict: F) -> Result<Option<T>, DomainError>
    where
        F: Fn(&T, &T) -> Option<DomainError>,
    {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&item.id()) {
            return Ok(None);
        }
        if let Some(err) = rows
            .values()
            .filter(|existing| existing.id() != item.id())
            .find_map(|existing| conflict(existing, &item))
        {
            return Err(err);
        }
        rows.insert(item.id(), item.clone());
        Ok(Some(item))
    }

    /// Apply `update` only while `expected` holds for the stored row
    pub async fn update_if<P, U>(&self, id: Uuid, expected: P, update: U) -> Option<T>
    where
        P: FnOnce(&T) -> bool,
        U: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id)?;
        if !expected(row) {
            return None;
        }
        update(row);
        Some(row.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Option<T> {
        self.rows.write().await.remove(&id)
    }

    /// Remove only while `expected` holds for the stored row
    pub async fn remove_if<P>(&self, id: Uuid, expected: P) -> Option<T>
    where
        P: FnOnce(&T) -> bool,
    {
        let mut rows = self.rows.write().await;
        if !rows.get(&id).map_or(false, expected) {
            return None;
        }
        rows.remove(&id)
    }

    pub async fn page_where<F>(&self, query: &ListQuery, scope: F) -> Page<T>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.rows.read().await;
        paginate(rows.values().filter(|row| scope(*row)), query)
    }

    pub async fn page(&self, query: &ListQuery) -> Page<T> {
        self.page_where(query, |_| true).await
    }
}
