//! Operation: list the dependency sets available to a project.

use std::path::Path;

use depsets_core::cache::CatalogCache;
use depsets_core::catalog::{SetId, SetOrigin};
use depsets_core::config::GlobalConfig;
use depsets_util::progress::status_info;

use crate::session::Session;

/// One row of the `depsets sets` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSummary {
    pub id: SetId,
    pub origin: SetOrigin,
    pub extends: Vec<SetId>,
    pub dependencies: usize,
}

impl SetSummary {
    fn line(&self, id_width: usize) -> String {
        let mut line = format!(
            "{:<id_width$}  {} dep(s)",
            self.id.as_str(),
            self.dependencies
        );
        if !self.extends.is_empty() {
            let extends: Vec<&str> = self.extends.iter().map(SetId::as_str).collect();
            line.push_str(&format!(", extends {}", extends.join(", ")));
        }
        if self.origin == SetOrigin::Sibling {
            line.push_str(" (module)");
        }
        line
    }
}

/// Summaries of every set in the catalog of the project at `manifest_path`,
/// sorted by id.
pub fn summaries(
    manifest_path: &Path,
    config: &GlobalConfig,
    cache: &CatalogCache,
) -> miette::Result<Vec<SetSummary>> {
    let session = Session::open(manifest_path, None, config, cache)?;
    Ok(session
        .catalog
        .catalog
        .iter()
        .map(|(id, def)| SetSummary {
            id: id.clone(),
            origin: def.origin,
            extends: def.extends.clone(),
            dependencies: def.dependencies.len(),
        })
        .collect())
}

/// Print the set listing to stdout.
pub fn sets(
    manifest_path: &Path,
    config: &GlobalConfig,
    cache: &CatalogCache,
) -> miette::Result<Vec<SetSummary>> {
    let summaries = summaries(manifest_path, config, cache)?;
    if summaries.is_empty() {
        println!("No dependency sets defined.");
        return Ok(summaries);
    }

    status_info("Listing", &format!("{} dependency set(s)", summaries.len()));
    let width = summaries
        .iter()
        .map(|s| s.id.as_str().chars().count())
        .max()
        .unwrap_or(0);
    for summary in &summaries {
        println!("{}", summary.line(width));
    }
    Ok(summaries)
}
