//! In-memory template set store with built-in sets.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use mapsmith_core::{
    application::{ApplicationError, ports::TemplateSetStore},
    domain::DocumentKind,
    engine::TemplateSet,
    error::MapsmithResult,
};

use crate::builtin_sets;

/// Thread-safe in-memory template set store.
///
/// Holds at most one set per document kind; inserting for a kind that
/// already has a set replaces it, which is how loader-provided sets
/// override the built-ins.
#[derive(Clone)]
pub struct InMemorySetStore {
    inner: Arc<RwLock<HashMap<DocumentKind, TemplateSet>>>,
}

impl InMemorySetStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store with the built-in sets loaded.
    pub fn with_builtin() -> MapsmithResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load the built-in sets, replacing any existing registrations.
    pub fn load_builtin(&self) -> MapsmithResult<()> {
        for (kind, set) in builtin_sets::all_sets() {
            self.insert(kind, set)?;
        }
        Ok(())
    }

    /// Get the number of registered sets.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all sets.
    pub fn clear(&self) -> MapsmithResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.clear();
        Ok(())
    }
}

impl Default for InMemorySetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSetStore for InMemorySetStore {
    fn get(&self, kind: DocumentKind) -> MapsmithResult<TemplateSet> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .get(&kind)
            .cloned()
            .ok_or_else(|| ApplicationError::SetNotFound { kind }.into())
    }

    fn insert(&self, kind: DocumentKind, set: TemplateSet) -> MapsmithResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(kind, set);
        Ok(())
    }

    fn kinds(&self) -> MapsmithResult<Vec<DocumentKind>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Stable order regardless of hash map iteration order.
        Ok(DocumentKind::ALL
            .into_iter()
            .filter(|kind| inner.contains_key(kind))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapsmith_core::error::MapsmithError;

    #[test]
    fn with_builtin_registers_every_kind() {
        let store = InMemorySetStore::with_builtin().unwrap();
        assert_eq!(store.kinds().unwrap(), DocumentKind::ALL.to_vec());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn missing_kind_is_set_not_found() {
        let store = InMemorySetStore::new();
        let err = store.get(DocumentKind::MockMap).unwrap_err();
        assert!(matches!(
            err,
            MapsmithError::Application(ApplicationError::SetNotFound {
                kind: DocumentKind::MockMap
            })
        ));
    }

    #[test]
    fn insert_replaces_existing_set() {
        let store = InMemorySetStore::with_builtin().unwrap();

        let mut custom = TemplateSet::new("custom:map");
        custom.insert("document", "override");
        store.insert(DocumentKind::Map, custom).unwrap();

        let set = store.get(DocumentKind::Map).unwrap();
        assert_eq!(set.name(), "custom:map");
        assert_eq!(set.get("document"), Some("override"));
    }
}
