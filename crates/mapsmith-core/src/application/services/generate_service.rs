//! Generate Service - main application orchestrator.
//!
//! Coordinates the whole generation workflow:
//! 1. Build use case details (resolver + synthesizer + example parser)
//! 2. Assemble the render input
//! 3. Compile the template set for the requested document kind
//! 4. Render to a source-text string
//!
//! The service never performs I/O; callers pass the rendered text to a
//! `DocumentSink` if they want it on disk. Output is byte-for-byte
//! deterministic given identical inputs.

use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::application::detail::build_use_case_details;
use crate::application::ports::TemplateSetStore;
use crate::domain::document::DocumentKind;
use crate::domain::profile::ProfileAst;
use crate::domain::provider::ProviderDefinition;
use crate::engine::TemplateEngine;
use crate::error::{MapsmithError, MapsmithResult};

/// A rendered document plus the suggested file name for it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    pub kind: DocumentKind,
    pub file_name: String,
    pub contents: String,
}

/// Main document generation service.
pub struct GenerateService {
    engine: TemplateEngine,
    sets: Box<dyn TemplateSetStore>,
}

impl GenerateService {
    /// Entry fragment every template set must provide.
    pub const ENTRY: &'static str = "document";

    pub fn new(sets: Box<dyn TemplateSetStore>) -> Self {
        Self {
            engine: TemplateEngine::new(),
            sets,
        }
    }

    /// Generate one document of the given kind.
    #[instrument(skip_all, fields(profile = %profile.profile_id(), provider = %provider.name, kind = %kind))]
    pub fn generate(
        &self,
        profile: &ProfileAst,
        provider: &ProviderDefinition,
        kind: DocumentKind,
    ) -> MapsmithResult<GeneratedDocument> {
        let input = self.render_input(profile, provider)?;

        let set = self.sets.get(kind)?;
        let compiled = self
            .engine
            .compile(&set, Self::ENTRY)
            .map_err(MapsmithError::Template)?;
        let contents = compiled.render(&input).map_err(MapsmithError::Template)?;

        info!(kind = %kind, bytes = contents.len(), "document generated");
        Ok(GeneratedDocument {
            kind,
            file_name: document_file_name(profile, provider, kind),
            contents,
        })
    }

    /// Generate several kinds in one pass over the same profile.
    pub fn generate_all(
        &self,
        profile: &ProfileAst,
        provider: &ProviderDefinition,
        kinds: &[DocumentKind],
    ) -> MapsmithResult<Vec<GeneratedDocument>> {
        kinds
            .iter()
            .map(|kind| self.generate(profile, provider, *kind))
            .collect()
    }

    /// The JSON tree template fragments render against.
    fn render_input(
        &self,
        profile: &ProfileAst,
        provider: &ProviderDefinition,
    ) -> MapsmithResult<Value> {
        let use_cases = build_use_case_details(profile).map_err(MapsmithError::Model)?;

        let mut profile_value = json!({
            "id": profile.profile_id(),
            "name": profile.header.name,
            "version": format!(
                "{}.{}",
                profile.header.version.major, profile.header.version.minor
            ),
        });
        if let Some(scope) = &profile.header.scope {
            profile_value["scope"] = json!(scope);
        }

        Ok(json!({
            "profile": profile_value,
            "provider": serde_json::to_value(provider).map_err(|e| {
                MapsmithError::Internal {
                    message: format!("provider definition is not serializable: {e}"),
                }
            })?,
            "useCases": serde_json::to_value(&use_cases).map_err(|e| {
                MapsmithError::Internal {
                    message: format!("use case details are not serializable: {e}"),
                }
            })?,
        }))
    }
}

/// Canonical output file name: `scope.name.provider.<ext>`.
fn document_file_name(
    profile: &ProfileAst,
    provider: &ProviderDefinition,
    kind: DocumentKind,
) -> String {
    let mut stem = String::new();
    if let Some(scope) = &profile.header.scope {
        stem.push_str(scope);
        stem.push('.');
    }
    stem.push_str(&profile.header.name);
    stem.push('.');
    stem.push_str(&provider.name);
    format!("{stem}.{}", kind.extension())
}
