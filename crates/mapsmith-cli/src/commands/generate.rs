//! Implementation of the `mapsmith generate` command.
//!
//! Responsibility: read the input documents, build the template set store,
//! call the core generate service, and write the results. No generation
//! logic lives here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use mapsmith_adapters::{FilesystemSetLoader, InMemorySetStore, LocalDocumentSink};
use mapsmith_core::{
    application::{GenerateService, ports::DocumentSink},
    domain::{DocumentKind, ProfileAst, ProviderDefinition},
};

use crate::{
    cli::{GenerateArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `mapsmith generate` command.
///
/// Dispatch sequence:
/// 1. Read and parse the profile and provider documents
/// 2. Build the template set store (built-ins, then custom overrides)
/// 3. Generate the requested document kinds
/// 4. Early-exit if `--dry-run`
/// 5. Write documents, refusing overwrites unless `--force`
#[instrument(skip_all, fields(profile = %args.profile.display()))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Input documents
    let profile: ProfileAst = read_json(&args.profile, "profile")?;
    let provider: ProviderDefinition = read_json(&args.provider, "provider")?;

    debug!(
        profile_id = %profile.profile_id(),
        provider = %provider.name,
        "inputs parsed"
    );

    // 2. Template set store
    let store = InMemorySetStore::with_builtin()?;
    let sets_dir = args.sets.as_ref().or(config.sets.local_path.as_ref());
    if let Some(dir) = sets_dir {
        let replaced = FilesystemSetLoader::new(dir).load_into(&store)?;
        if !replaced.is_empty() {
            info!(dir = %dir.display(), count = replaced.len(), "custom template sets loaded");
        }
    }

    // 3. Generate
    let kinds = resolve_kinds(&args);
    let out_dir = resolve_out_dir(&args, &config);

    let service = GenerateService::new(Box::new(store));
    let documents = service.generate_all(&profile, &provider, &kinds)?;

    // 4. Dry run: describe but do not write.
    if args.dry_run {
        output.info(&format!(
            "Dry run: would write {} document(s) to {}",
            documents.len(),
            out_dir.display(),
        ))?;
        for doc in &documents {
            output.print(&format!("  {} ({})", doc.file_name, doc.kind))?;
        }
        return Ok(());
    }

    // 5. Write. The overwrite check runs before any write so that kinds
    // sharing a file name (map, mock map and prepared map all produce
    // `.suma`) do not trip it mid-run; among those, the last kind wins.
    let sink = LocalDocumentSink::new();
    if !args.force {
        for doc in &documents {
            let path = out_dir.join(&doc.file_name);
            if sink.exists(&path) {
                return Err(CliError::DocumentExists { path });
            }
        }
    }
    output.header(&format!("Generating into {}...", out_dir.display()))?;

    for doc in &documents {
        let path = out_dir.join(&doc.file_name);
        sink.write(&path, &doc.contents)?;
        info!(path = %path.display(), kind = %doc.kind, "document written");
        output.success(&format!("{} ({})", doc.file_name, doc.kind))?;
    }

    if !global.quiet {
        output.print("")?;
        output.print(&format!(
            "Generated {} document(s) for {}",
            documents.len(),
            profile.profile_id(),
        ))?;
    }

    Ok(())
}

/// Read and deserialize a JSON input document.
fn read_json<T: DeserializeOwned>(path: &Path, role: &'static str) -> CliResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| CliError::DocumentRead {
        role,
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&raw).map_err(|e| CliError::DocumentParse {
        role,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Requested kinds, deduplicated in `DocumentKind::ALL` order. No `--kind`
/// flag means every kind.
fn resolve_kinds(args: &GenerateArgs) -> Vec<DocumentKind> {
    if args.kinds.is_empty() {
        return DocumentKind::ALL.to_vec();
    }
    let requested: Vec<DocumentKind> = args.kinds.iter().map(|&k| k.into()).collect();
    DocumentKind::ALL
        .into_iter()
        .filter(|kind| requested.contains(kind))
        .collect()
}

/// `--out` wins over the configured default when it differs from clap's
/// default value.
fn resolve_out_dir(args: &GenerateArgs, config: &AppConfig) -> PathBuf {
    if args.out != Path::new(".") {
        args.out.clone()
    } else {
        config.generate.out_dir.clone()
    }
}
