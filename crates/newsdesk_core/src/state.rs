use serde::{Deserialize, Serialize};

use crate::Entity;

/// Where a newly created entity lands in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    /// Newest first, e.g. articles and advertisements.
    Prepend,
    /// Reference data kept in creation order.
    #[default]
    Append,
}

/// The `pagination` object of a list envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub limit: u32,
}

/// State of one CRUD-managed entity type.
///
/// `loading` is derived from the number of in-flight operations, so it stays
/// true until the last concurrent operation on this resource completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    items: Vec<T>,
    current: Option<T>,
    error: Option<String>,
    pagination: Option<Pagination>,
    in_flight: usize,
    insert_position: InsertPosition,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self::new(InsertPosition::default())
    }
}

impl<T> ResourceState<T> {
    pub fn new(insert_position: InsertPosition) -> Self {
        Self {
            items: Vec::new(),
            current: None,
            error: None,
            pagination: None,
            in_flight: 0,
            insert_position,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    pub fn insert_position(&self) -> InsertPosition {
        self.insert_position
    }

    pub(crate) fn begin(&mut self) {
        self.in_flight += 1;
        self.error = None;
    }

    pub(crate) fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    pub(crate) fn set_current(&mut self, item: Option<T>) {
        self.current = item;
    }
}

impl<T: Entity> ResourceState<T> {
    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(Entity::id).collect()
    }

    /// Replaces items and pagination, dropping repeated ids (first wins).
    pub(crate) fn replace_all(&mut self, items: Vec<T>, pagination: Option<Pagination>) {
        let mut unique: Vec<T> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.iter().any(|seen| seen.id() == item.id()) {
                unique.push(item);
            }
        }
        self.items = unique;
        self.pagination = pagination;
    }

    /// Inserts at the configured end, or replaces in place if the id exists.
    pub(crate) fn insert(&mut self, item: T) {
        if self.replace(item.clone()) {
            return;
        }
        match self.insert_position {
            InsertPosition::Prepend => self.items.insert(0, item),
            InsertPosition::Append => self.items.push(item),
        }
    }

    /// Returns false when no item has the same id.
    pub(crate) fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
        if self.current.as_ref().is_some_and(|current| current.id() == id) {
            self.current = None;
        }
    }
}
