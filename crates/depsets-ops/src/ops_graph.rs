//! Operation: write the dependency-set graph as a Graphviz DOT file.

use std::path::{Path, PathBuf};

use depsets_core::cache::CatalogCache;
use depsets_core::config::GlobalConfig;
use depsets_resolver::builder::build_graph;
use depsets_util::errors::DepsetsError;
use depsets_util::fs::ensure_dir;
use depsets_util::progress::status;

use crate::dot;
use crate::session::Session;

/// Options for `depsets graph`.
#[derive(Debug, Default)]
pub struct GraphOptions {
    /// Profiles to activate, in order. `None` activates every profile.
    pub profiles: Option<Vec<String>>,
    /// Output file. Defaults to the configured path under the project root.
    pub output: Option<PathBuf>,
}

/// Build the graph of the project at `manifest_path` and write it as DOT.
///
/// Returns the path written.
pub fn graph(
    manifest_path: &Path,
    opts: &GraphOptions,
    config: &GlobalConfig,
    cache: &CatalogCache,
) -> miette::Result<PathBuf> {
    let session = Session::open(manifest_path, opts.profiles.as_deref(), config, cache)?;
    let graph = build_graph(&session.project, &session.catalog.catalog);

    let output = match &opts.output {
        Some(path) => path.clone(),
        None => session.root_dir.join(&config.graph.output),
    };
    if let Some(parent) = output.parent() {
        ensure_dir(parent).map_err(DepsetsError::Io)?;
    }
    std::fs::write(&output, dot::to_dot(&graph)).map_err(DepsetsError::Io)?;

    status(
        "Wrote",
        &format!(
            "{} ({} nodes, {} edges)",
            output.display(),
            graph.node_count(),
            graph.edge_count()
        ),
    );
    Ok(output)
}
