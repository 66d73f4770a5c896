//! Handler for `depsets graph`.

use std::path::{Path, PathBuf};

use depsets_core::cache::CatalogCache;
use depsets_ops::ops_graph::{self, GraphOptions};
use miette::Result;

pub fn exec(
    manifest_path: &Path,
    profile: Option<Vec<String>>,
    output: Option<PathBuf>,
) -> Result<()> {
    let opts = GraphOptions {
        profiles: profile,
        output,
    };
    let config = super::load_config();
    let cache = CatalogCache::new();

    ops_graph::graph(manifest_path, &opts, &config, &cache)?;
    Ok(())
}
