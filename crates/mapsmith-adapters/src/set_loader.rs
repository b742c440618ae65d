//! Filesystem-based template set loader.
//!
//! Discovers and parses `set.toml` manifests from a directory tree,
//! turning each manifest directory into a [`TemplateSet`] registered for
//! one document kind. Loaded sets replace the built-in set for the same
//! kind, which is how users customize generated output.
//!
//! # Directory layout expected
//!
//! ```text
//! sets/
//! ├── acme-map/
//! │   ├── set.toml             ← manifest (required)
//! │   ├── document.tpl         ← entry fragment
//! │   ├── useCase.tpl
//! │   └── exampleValue.tpl
//! └── acme-test/
//!     ├── set.toml
//!     └── document.tpl
//! ```
//!
//! Every `*.tpl` file next to the manifest becomes a fragment named after
//! its file stem. A `document` fragment is required since it is the entry
//! point the generate service renders.
//!
//! # `set.toml` format
//!
//! ```toml
//! [set]
//! kind = "map"        # map | mock-map | prepared-map | prepared-test
//! name = "acme-map"   # optional; defaults to the directory name
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use mapsmith_core::{
    domain::DocumentKind,
    engine::{CompiledTemplate, TemplateSet},
    error::{MapsmithError, MapsmithResult},
};

use crate::store::InMemorySetStore;
use mapsmith_core::application::ports::TemplateSetStore;

/// Fragment file extension.
const FRAGMENT_EXT: &str = "tpl";

/// Manifest file name that marks a set directory.
const MANIFEST_NAME: &str = "set.toml";

/// Fragment every set must provide (the render entry point).
const ENTRY_FRAGMENT: &str = "document";

/// Deserialised representation of a `set.toml` file.
#[derive(Debug, Deserialize)]
struct SetManifest {
    set: SetSection,
}

/// `[set]` section of the manifest.
#[derive(Debug, Deserialize)]
struct SetSection {
    /// Which document kind this set renders.
    kind: String,
    /// Display name; defaults to the set's directory name.
    name: Option<String>,
}

/// Loads template sets from a directory tree.
pub struct FilesystemSetLoader {
    root: PathBuf,
}

impl FilesystemSetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load every valid set under the root.
    ///
    /// Directory-read failures on the root propagate as
    /// [`MapsmithError::Configuration`]; individual sets that fail to
    /// parse or compile are skipped with a warning.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_all(&self) -> MapsmithResult<Vec<(DocumentKind, TemplateSet)>> {
        if !self.root.is_dir() {
            return Err(MapsmithError::Configuration {
                message: format!("template set directory not found: {}", self.root.display()),
            });
        }

        let mut sets = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(2)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| MapsmithError::Configuration {
                message: format!("failed to read {}: {}", self.root.display(), e),
            })?;

            if entry.file_name() != MANIFEST_NAME {
                continue;
            }

            match self.load_one(entry.path()) {
                Ok(loaded) => {
                    debug!(path = %entry.path().display(), "loaded template set");
                    sets.push(loaded);
                }
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "skipping invalid template set");
                }
            }
        }

        Ok(sets)
    }

    /// Load sets and register them in `store`, replacing built-ins for the
    /// kinds that were overridden. Returns the kinds that were replaced.
    pub fn load_into(&self, store: &InMemorySetStore) -> MapsmithResult<Vec<DocumentKind>> {
        let mut kinds = Vec::new();
        for (kind, set) in self.load_all()? {
            store.insert(kind, set)?;
            kinds.push(kind);
        }
        Ok(kinds)
    }

    /// Parse one manifest and collect its fragment files.
    fn load_one(&self, manifest_path: &Path) -> MapsmithResult<(DocumentKind, TemplateSet)> {
        let dir = manifest_path
            .parent()
            .ok_or_else(|| MapsmithError::Configuration {
                message: format!("manifest has no parent directory: {}", manifest_path.display()),
            })?;

        let raw = fs::read_to_string(manifest_path).map_err(|e| MapsmithError::Configuration {
            message: format!("failed to read {}: {}", manifest_path.display(), e),
        })?;
        let manifest: SetManifest =
            toml::from_str(&raw).map_err(|e| MapsmithError::Configuration {
                message: format!("invalid manifest {}: {}", manifest_path.display(), e),
            })?;

        let kind: DocumentKind =
            manifest
                .set
                .kind
                .parse()
                .map_err(|e| MapsmithError::Configuration {
                    message: format!("invalid manifest {}: {}", manifest_path.display(), e),
                })?;

        let name = manifest.set.name.unwrap_or_else(|| {
            dir.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| kind.to_string())
        });

        let mut set = TemplateSet::new(&name);
        for fragment in fragment_files(dir)? {
            let Some(stem) = fragment.file_stem().map(|s| s.to_string_lossy().into_owned())
            else {
                continue;
            };
            let text = fs::read_to_string(&fragment).map_err(|e| MapsmithError::Configuration {
                message: format!("failed to read {}: {}", fragment.display(), e),
            })?;
            set.insert(stem, text);
        }

        if set.get(ENTRY_FRAGMENT).is_none() {
            return Err(MapsmithError::Configuration {
                message: format!("set '{}' has no {ENTRY_FRAGMENT}.{FRAGMENT_EXT} fragment", name),
            });
        }

        // Reject sets that would only fail later at generation time.
        CompiledTemplate::compile(&set, ENTRY_FRAGMENT).map_err(MapsmithError::Template)?;

        Ok((kind, set))
    }
}

/// All `*.tpl` files directly inside `dir`, sorted for determinism.
fn fragment_files(dir: &Path) -> MapsmithResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| MapsmithError::Configuration {
        message: format!("failed to read {}: {}", dir.display(), e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MapsmithError::Configuration {
            message: format!("failed to read {}: {}", dir.display(), e),
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == FRAGMENT_EXT) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_set(root: &Path, dir_name: &str, manifest: &str, fragments: &[(&str, &str)]) {
        let dir = root.join(dir_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_NAME), manifest).unwrap();
        for (name, text) in fragments {
            fs::write(dir.join(format!("{name}.{FRAGMENT_EXT}")), text).unwrap();
        }
    }

    #[test]
    fn loads_set_with_fragments_from_directory() {
        let tmp = tempfile::tempdir().unwrap();
        write_set(
            tmp.path(),
            "acme-map",
            "[set]\nkind = \"map\"\n",
            &[
                ("document", "{{> header}}body"),
                ("header", "// generated\n"),
            ],
        );

        let loader = FilesystemSetLoader::new(tmp.path());
        let sets = loader.load_all().unwrap();

        assert_eq!(sets.len(), 1);
        let (kind, set) = &sets[0];
        assert_eq!(*kind, DocumentKind::Map);
        assert_eq!(set.name(), "acme-map");
        assert_eq!(set.get("header"), Some("// generated\n"));
    }

    #[test]
    fn manifest_name_overrides_directory_name() {
        let tmp = tempfile::tempdir().unwrap();
        write_set(
            tmp.path(),
            "whatever",
            "[set]\nkind = \"mock-map\"\nname = \"custom\"\n",
            &[("document", "x")],
        );

        let sets = FilesystemSetLoader::new(tmp.path()).load_all().unwrap();
        assert_eq!(sets[0].1.name(), "custom");
    }

    #[test]
    fn set_without_document_fragment_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_set(
            tmp.path(),
            "broken",
            "[set]\nkind = \"map\"\n",
            &[("useCase", "x")],
        );

        let sets = FilesystemSetLoader::new(tmp.path()).load_all().unwrap();
        assert!(sets.is_empty());
    }

    #[test]
    fn set_with_malformed_fragment_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_set(
            tmp.path(),
            "broken",
            "[set]\nkind = \"map\"\n",
            &[("document", "{{#each items}}unclosed")],
        );
        write_set(
            tmp.path(),
            "good",
            "[set]\nkind = \"mock-map\"\n",
            &[("document", "fine")],
        );

        let sets = FilesystemSetLoader::new(tmp.path()).load_all().unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].0, DocumentKind::MockMap);
    }

    #[test]
    fn missing_root_is_a_configuration_error() {
        let loader = FilesystemSetLoader::new("/nonexistent/sets");
        let err = loader.load_all().unwrap_err();
        assert!(matches!(err, MapsmithError::Configuration { .. }));
    }

    #[test]
    fn load_into_replaces_builtin_set() {
        let tmp = tempfile::tempdir().unwrap();
        write_set(
            tmp.path(),
            "acme-map",
            "[set]\nkind = \"map\"\n",
            &[("document", "custom output")],
        );

        let store = InMemorySetStore::with_builtin().unwrap();
        let replaced = FilesystemSetLoader::new(tmp.path())
            .load_into(&store)
            .unwrap();

        assert_eq!(replaced, vec![DocumentKind::Map]);
        let set = store.get(DocumentKind::Map).unwrap();
        assert_eq!(set.get("document"), Some("custom output"));
    }
}
