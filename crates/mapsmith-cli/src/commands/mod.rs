//! Command handlers. Each submodule owns one subcommand.

pub mod completions;
pub mod detect;
pub mod generate;
