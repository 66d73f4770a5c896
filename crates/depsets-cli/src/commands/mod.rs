//! Command dispatch and handler modules.

mod graph;
mod merge;
mod sets;

use depsets_core::config::GlobalConfig;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Merge { profile, format } => merge::exec(&cli.manifest_path, profile, &format),
        Command::Graph { profile, output } => graph::exec(&cli.manifest_path, profile, output),
        Command::Sets => sets::exec(&cli.manifest_path),
    }
}

/// Load the global configuration, falling back to defaults on error.
fn load_config() -> GlobalConfig {
    match GlobalConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to load global config, using defaults: {e}");
            GlobalConfig::default()
        }
    }
}
