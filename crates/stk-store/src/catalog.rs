//! Category slots and the index that orders them.
//!
//! Lock order is slot before index. The index lock is only ever held on its
//! own, except by `create_category` which inserts a slot nobody else can see.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stk_core::entities::{AssetRecord, CategorySchema};
use stk_core::errors::CoreError;

/// Schema and records of one category.
#[derive(Debug)]
pub(crate) struct CategoryState {
    pub schema: CategorySchema,
    pub records: Vec<AssetRecord>,
    /// Set under the write lock by `remove_category` before the slot is
    /// unlinked from the index.
    pub dropped: bool,
}

impl CategoryState {
    /// Position of the first record matching `identifier` on the first
    /// identifier field, falling back to the second.
    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.schema.identifier_fields().find_map(|field| {
            self.records
                .iter()
                .position(|record| record.matches(field, identifier))
        })
    }

    /// Every record matching `identifier`, using the same field fallback as
    /// [`Self::position`].
    pub fn matching(&self, identifier: &str) -> Vec<&AssetRecord> {
        for field in self.schema.identifier_fields() {
            let hits: Vec<&AssetRecord> = self
                .records
                .iter()
                .filter(|record| record.matches(field, identifier))
                .collect();
            if !hits.is_empty() {
                return hits;
            }
        }
        Vec::new()
    }
}

#[derive(Debug)]
pub(crate) struct CategorySlot {
    name: String,
    state: RwLock<CategoryState>,
}

impl CategorySlot {
    pub fn new(schema: CategorySchema) -> Self {
        Self {
            name: schema.table_name.clone(),
            state: RwLock::new(CategoryState {
                schema,
                records: Vec::new(),
                dropped: false,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the live state, or `UnknownCategory` if the slot was dropped.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, CategoryState>, CoreError> {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if guard.dropped {
            return Err(CoreError::unknown_category(&self.name));
        }
        Ok(guard)
    }

    /// Write the live state, or `UnknownCategory` if the slot was dropped.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, CategoryState>, CoreError> {
        let guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if guard.dropped {
            return Err(CoreError::unknown_category(&self.name));
        }
        Ok(guard)
    }
}

/// Insertion-ordered category slots.
#[derive(Debug, Default)]
pub(crate) struct CatalogIndex {
    order: Vec<Arc<CategorySlot>>,
    by_name: HashMap<String, Arc<CategorySlot>>,
}

impl CatalogIndex {
    pub fn get(&self, name: &str) -> Option<Arc<CategorySlot>> {
        self.by_name.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn insert(&mut self, slot: Arc<CategorySlot>) {
        self.by_name.insert(slot.name().to_string(), Arc::clone(&slot));
        self.order.push(slot);
    }

    /// Unlink `slot`, leaving a same-named replacement untouched.
    pub fn remove(&mut self, slot: &Arc<CategorySlot>) {
        if self
            .by_name
            .get(slot.name())
            .is_some_and(|current| Arc::ptr_eq(current, slot))
        {
            self.by_name.remove(slot.name());
        }
        self.order.retain(|s| !Arc::ptr_eq(s, slot));
    }

    pub fn slots(&self) -> Vec<Arc<CategorySlot>> {
        self.order.clone()
    }
}

/// The catalog index behind its own lock.
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    index: RwLock<CatalogIndex>,
}

impl Catalog {
    pub fn read(&self) -> RwLockReadGuard<'_, CatalogIndex> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, CatalogIndex> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a slot, releasing the index lock before returning.
    pub fn slot(&self, name: &str) -> Result<Arc<CategorySlot>, CoreError> {
        self.read()
            .get(name)
            .ok_or_else(|| CoreError::unknown_category(name))
    }

    /// Snapshot of all slots in insertion order.
    pub fn slots(&self) -> Vec<Arc<CategorySlot>> {
        self.read().slots()
    }
}
