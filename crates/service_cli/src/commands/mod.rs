//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod price;
pub mod solve;

/// Output format shared by the commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}
