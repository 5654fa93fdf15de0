//! Check command implementation
//!
//! Prints the effective configuration after all sources are merged.

use std::io::Write;

use tracing::info;

use super::OutputFormat;
use crate::config::SolverSettings;
use crate::Result;

/// Run the check command
pub fn run<W: Write>(settings: &SolverSettings, format: OutputFormat, out: &mut W) -> Result<()> {
    settings.validate()?;
    info!(method = %settings.method, "Configuration is valid");

    match format {
        OutputFormat::Text => {
            writeln!(out, "# impvol {}", env!("CARGO_PKG_VERSION"))?;
            write!(out, "{}", toml::to_string_pretty(settings)?)?;
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(settings)?)?,
    }

    Ok(())
}
