//! Handler for `depsets merge`.

use std::path::Path;

use depsets_core::cache::CatalogCache;
use depsets_ops::ops_merge::{self, MergeOptions, OutputFormat};
use miette::Result;

pub fn exec(manifest_path: &Path, profile: Option<Vec<String>>, format: &str) -> Result<()> {
    let opts = MergeOptions {
        profiles: profile,
        format: format.parse::<OutputFormat>()?,
    };
    let config = super::load_config();
    let cache = CatalogCache::new();

    ops_merge::merge(manifest_path, &opts, &config, &cache)?;
    Ok(())
}
