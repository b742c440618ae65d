//! Infrastructure adapters for Mapsmith.
//!
//! This crate implements the ports defined in `mapsmith-core::application::ports`.
//! It contains all external dependencies and I/O operations: the builtin
//! template sets, the filesystem set loader, and document sinks.

pub mod builtin_sets;
pub mod set_loader;
pub mod sink;
pub mod store;

// Re-export commonly used adapters
pub use set_loader::FilesystemSetLoader;
pub use sink::{LocalDocumentSink, MemoryDocumentSink};
pub use store::InMemorySetStore;
