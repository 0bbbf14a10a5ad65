//! Per-type schema cache

use super::{Record, Schema};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

type Entry = Arc<dyn Any + Send + Sync>;

/// Resolved record schemas keyed by record type
///
/// Each type's schema is built the first time it is requested and shared
/// from then on. Entries are never evicted. Two threads racing on the first
/// resolution of a type may both build it; the first one stored is the one
/// every caller gets.
#[derive(Default)]
pub struct SchemaCache {
    entries: RwLock<HashMap<TypeId, Entry>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema for `T`, building and caching it on first use
    pub fn resolve<T: Record>(&self) -> Arc<Schema<T>> {
        let type_id = TypeId::of::<T>();

        if let Some(entry) = self.read_entries().get(&type_id) {
            if let Ok(schema) = Arc::clone(entry).downcast::<Schema<T>>() {
                return schema;
            }
        }

        let schema = Arc::new(T::schema());
        trace!(
            record = std::any::type_name::<T>(),
            fields = schema.len(),
            "resolved record schema"
        );

        let mut entries = self.write_entries();
        let entry = entries
            .entry(type_id)
            .or_insert_with(|| Arc::clone(&schema) as Entry);
        Arc::clone(entry).downcast::<Schema<T>>().unwrap_or(schema)
    }

    /// Whether `T` has been resolved already
    pub fn contains<T: Record>(&self) -> bool {
        self.read_entries().contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written entry
    // behind, so poisoning is ignored.
    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCache")
            .field("types", &self.len())
            .finish()
    }
}
