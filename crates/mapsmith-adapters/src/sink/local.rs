//! Local filesystem document sink using std::fs.

use std::io;
use std::path::Path;

use mapsmith_core::{
    application::{ApplicationError, ports::DocumentSink},
    error::MapsmithResult,
};

/// Production document sink writing through `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalDocumentSink;

impl LocalDocumentSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalDocumentSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink for LocalDocumentSink {
    fn write(&self, path: &Path, contents: &str) -> MapsmithResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| map_io_error(path, e, "create parent directory"))?;
            }
        }
        std::fs::write(path, contents).map_err(|e| map_io_error(path, e, "write document"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> mapsmith_core::error::MapsmithError {
    ApplicationError::SinkError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
