//! Catalog cache shared by every module resolved in one invocation.
//!
//! Catalog files are read once per path and umbrella sibling maps once per
//! umbrella root. Entries are immutable `Arc<Catalog>` values behind a
//! read-mostly lock, so one cache may serve concurrent resolutions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use depsets_util::fs::find_ancestor_with;

use crate::catalog::Catalog;
use crate::config::CatalogSettings;
use crate::workspace::{find_umbrella, Workspace};

/// The catalog a project resolves against, and where it came from.
#[derive(Debug, Clone)]
pub struct CatalogLookup {
    pub catalog: Arc<Catalog>,
    /// The catalog file that was found, if any.
    pub source: Option<PathBuf>,
    /// Number of implicit sets contributed by umbrella modules.
    pub sibling_sets: usize,
}

impl CatalogLookup {
    /// `true` when neither a catalog file nor sibling modules were found.
    pub fn is_unavailable(&self) -> bool {
        self.source.is_none() && self.sibling_sets == 0
    }
}

/// Explicit cache of loaded catalogs. Construct one per invocation.
#[derive(Debug, Default)]
pub struct CatalogCache {
    files: RwLock<HashMap<PathBuf, Arc<Catalog>>>,
    siblings: RwLock<HashMap<PathBuf, Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog file at `path`, reusing a previous load.
    pub fn catalog_file(&self, path: &Path) -> miette::Result<Arc<Catalog>> {
        if let Some(hit) = read(&self.files, path) {
            return Ok(hit);
        }
        let catalog = Arc::new(Catalog::from_path(path)?);
        tracing::debug!("loaded {} set(s) from {}", catalog.len(), path.display());
        Ok(insert(&self.files, path, catalog))
    }

    /// Implicit sets of the umbrella enclosing `project_root`, reusing a
    /// previous discovery of the same umbrella.
    pub fn siblings(&self, project_root: &Path) -> miette::Result<Arc<Catalog>> {
        let Some((root, modules)) = find_umbrella(project_root) else {
            return Ok(Arc::new(Catalog::new()));
        };
        if let Some(hit) = read(&self.siblings, &root) {
            return Ok(hit);
        }
        let catalog = Arc::new(Workspace::load(&root, &modules)?.sibling_catalog());
        Ok(insert(&self.siblings, &root, catalog))
    }

    /// The catalog for the project rooted at `project_root`: the nearest
    /// catalog file (searching ancestors), with umbrella sibling sets filling
    /// in ids the file does not define.
    pub fn lookup(
        &self,
        project_root: &Path,
        settings: &CatalogSettings,
    ) -> miette::Result<CatalogLookup> {
        let source = find_ancestor_with(project_root, &settings.file_name)
            .map(|dir| dir.join(&settings.file_name));
        let file_catalog = match &source {
            Some(path) => self.catalog_file(path)?,
            None => Arc::new(Catalog::new()),
        };

        let siblings = if settings.siblings {
            self.siblings(project_root)?
        } else {
            Arc::new(Catalog::new())
        };

        let catalog = if siblings.is_empty() {
            file_catalog
        } else {
            Arc::new(file_catalog.as_ref().clone().with_fallback(&siblings))
        };

        if source.is_none() && siblings.is_empty() {
            tracing::debug!(
                "No {} found from {} and no umbrella modules; using an empty catalog",
                settings.file_name,
                project_root.display()
            );
        }

        Ok(CatalogLookup {
            catalog,
            source,
            sibling_sets: siblings.len(),
        })
    }
}

fn read(map: &RwLock<HashMap<PathBuf, Arc<Catalog>>>, key: &Path) -> Option<Arc<Catalog>> {
    let guard = map.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.get(key).cloned()
}

fn insert(
    map: &RwLock<HashMap<PathBuf, Arc<Catalog>>>,
    key: &Path,
    catalog: Arc<Catalog>,
) -> Arc<Catalog> {
    let mut guard = map.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard
        .entry(key.to_path_buf())
        .or_insert(catalog)
        .clone()
}
