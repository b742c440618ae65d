//! In-memory document sink for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use mapsmith_core::{
    application::{ApplicationError, ports::DocumentSink},
    error::MapsmithResult,
};

/// In-memory document sink. Cloning shares the underlying map, so a test
/// can keep a handle while passing another into the code under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentSink {
    inner: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MemoryDocumentSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a written document back (testing helper).
    pub fn read(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.get(path).cloned()
    }

    /// Paths of all written documents.
    pub fn paths(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut paths: Vec<_> = inner.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl DocumentSink for MemoryDocumentSink {
    fn write(&self, path: &Path, contents: &str) -> MapsmithResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains_key(path))
            .unwrap_or(false)
    }
}
