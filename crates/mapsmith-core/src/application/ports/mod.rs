//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `mapsmith-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::document::DocumentKind;
use crate::engine::TemplateSet;
use crate::error::MapsmithResult;

/// Port for template set storage and retrieval.
///
/// Implemented by:
/// - `mapsmith_adapters::InMemorySetStore` (builtin sets)
/// - the filesystem loader feeding custom sets into the same store
pub trait TemplateSetStore: Send + Sync {
    /// Get the template set for a document kind.
    fn get(&self, kind: DocumentKind) -> MapsmithResult<TemplateSet>;

    /// Register or replace the set for a document kind.
    fn insert(&self, kind: DocumentKind, set: TemplateSet) -> MapsmithResult<()>;

    /// Document kinds with a registered set.
    fn kinds(&self) -> MapsmithResult<Vec<DocumentKind>>;
}

/// Port for writing generated documents.
///
/// Implemented by:
/// - `mapsmith_adapters::LocalDocumentSink` (production)
/// - `mapsmith_adapters::MemoryDocumentSink` (testing)
pub trait DocumentSink: Send + Sync {
    /// Write a generated document, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &str) -> MapsmithResult<()>;

    /// Check whether a document already exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}
