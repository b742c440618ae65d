//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use mapsmith_core::domain::DocumentKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "mapsmith",
    bin_name = "mapsmith",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f528} Generate integration maps, mocks and tests from profiles",
    long_about = "Mapsmith reads a parsed profile and a provider definition and \
                  generates integration map documents, mock maps and test suites.",
    after_help = "EXAMPLES:\n\
        \x20 mapsmith generate profile.json --provider provider.json\n\
        \x20 mapsmith generate profile.json --provider provider.json --kind mock-map\n\
        \x20 mapsmith detect api.suma api.supr notes.txt\n\
        \x20 mapsmith completions bash > /usr/share/bash-completion/completions/mapsmith",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate documents from a profile and provider definition.
    #[command(
        visible_alias = "gen",
        about = "Generate map documents",
        after_help = "EXAMPLES:\n\
            \x20 mapsmith generate profile.json --provider provider.json\n\
            \x20 mapsmith generate profile.json --provider provider.json --kind map --kind prepared-test\n\
            \x20 mapsmith generate profile.json --provider provider.json --out ./generated --force"
    )]
    Generate(GenerateArgs),

    /// Classify files as maps or profiles by extension.
    #[command(
        about = "Detect document formats",
        after_help = "EXAMPLES:\n\
            \x20 mapsmith detect api.suma\n\
            \x20 mapsmith detect src/*.supr --output-format json"
    )]
    Detect(DetectArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 mapsmith completions bash > ~/.local/share/bash-completion/completions/mapsmith\n\
            \x20 mapsmith completions zsh  > ~/.zfunc/_mapsmith\n\
            \x20 mapsmith completions fish > ~/.config/fish/completions/mapsmith.fish"
    )]
    Completions(CompletionsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `mapsmith generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Path to the parsed profile (JSON AST).
    #[arg(value_name = "PROFILE", help = "Parsed profile JSON file")]
    pub profile: PathBuf,

    /// Path to the provider definition.
    #[arg(
        short = 'p',
        long = "provider",
        value_name = "FILE",
        help = "Provider definition JSON file"
    )]
    pub provider: PathBuf,

    /// Document kinds to generate.  Repeatable; defaults to every kind.
    #[arg(
        short = 'k',
        long = "kind",
        value_name = "KIND",
        value_enum,
        help = "Document kind to generate (repeatable)"
    )]
    pub kinds: Vec<KindArg>,

    /// Output directory for generated documents.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        default_value = ".",
        help = "Output directory"
    )]
    pub out: PathBuf,

    /// Directory of custom template sets overriding the built-ins.
    #[arg(long = "sets", value_name = "DIR", help = "Custom template set directory")]
    pub sets: Option<PathBuf>,

    /// Overwrite documents that already exist.
    #[arg(long = "force", help = "Overwrite existing documents")]
    pub force: bool,

    /// Preview what would be generated without writing any files.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,
}

/// Document kind as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum KindArg {
    Map,
    MockMap,
    PreparedMap,
    PreparedTest,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Map => Self::Map,
            KindArg::MockMap => Self::MockMap,
            KindArg::PreparedMap => Self::PreparedMap,
            KindArg::PreparedTest => Self::PreparedTest,
        }
    }
}

// ── detect ────────────────────────────────────────────────────────────────────

/// Arguments for `mapsmith detect`.
#[derive(Debug, Args)]
pub struct DetectArgs {
    /// File names to classify.
    #[arg(value_name = "FILE", required = true, help = "File names to classify")]
    pub files: Vec<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `mapsmith completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
