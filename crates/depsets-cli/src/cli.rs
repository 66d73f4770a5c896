//! CLI argument definitions for depsets.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "depsets",
    version,
    about = "Expand named dependency sets into project dependency lists",
    long_about = "depsets resolves the dependency sets a project requests from a shared \
                  catalog, follows their `extends` chains, and merges the result into the \
                  project's base and profile dependency lists."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the project descriptor
    #[arg(long, global = true, default_value = "Project.toml")]
    pub manifest_path: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the project descriptor with every dependency set expanded
    Merge {
        /// Profiles to activate, in order (default: all declared profiles)
        #[arg(short, long, value_delimiter = ',')]
        profile: Option<Vec<String>>,
        /// Output format: toml, json
        #[arg(short, long, default_value = "toml", value_parser = ["toml", "json"])]
        format: String,
    },

    /// Write the dependency-set graph as a Graphviz DOT file
    Graph {
        /// Profiles to activate, in order (default: all declared profiles)
        #[arg(short, long, value_delimiter = ',')]
        profile: Option<Vec<String>>,
        /// Output file (default: `[graph] output` from the global config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the dependency sets available to the project
    Sets,
}

pub fn parse() -> Cli {
    Cli::parse()
}
