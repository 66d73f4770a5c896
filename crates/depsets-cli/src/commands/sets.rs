//! Handler for `depsets sets`.

use std::path::Path;

use depsets_core::cache::CatalogCache;
use depsets_ops::ops_sets;
use miette::Result;

pub fn exec(manifest_path: &Path) -> Result<()> {
    let config = super::load_config();
    ops_sets::sets(manifest_path, &config, &CatalogCache::new())?;
    Ok(())
}
