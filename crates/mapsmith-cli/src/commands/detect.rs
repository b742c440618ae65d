//! Implementation of the `mapsmith detect` command.

use serde_json::json;

use mapsmith_core::domain::DocumentFormat;

use crate::{
    cli::{DetectArgs, OutputFormat, global::GlobalArgs},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: DetectArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let detections: Vec<(String, DocumentFormat)> = args
        .files
        .into_iter()
        .map(|file| {
            let format = DocumentFormat::detect(&file);
            (file, format)
        })
        .collect();

    match output.format() {
        OutputFormat::Json => {
            // JSON goes straight to stdout so it stays parseable in pipes.
            let entries: Vec<_> = detections
                .iter()
                .map(|(file, format)| json!({ "file": file, "format": format.to_string() }))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".into())
            );
        }
        _ => {
            for (file, format) in &detections {
                match format {
                    DocumentFormat::Unknown => {
                        output.warning(&format!("{file}: {format}"))?;
                    }
                    _ => output.print(&format!("{file}: {format}"))?,
                }
            }
        }
    }

    Ok(())
}
