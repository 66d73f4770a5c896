//! Everything one operation needs about the project it runs on.

use std::path::{Path, PathBuf};

use depsets_core::cache::{CatalogCache, CatalogLookup};
use depsets_core::config::GlobalConfig;
use depsets_core::manifest::Manifest;
use depsets_core::project::ProjectDescriptor;
use depsets_util::errors::DepsetsError;
use depsets_util::progress::status_warn;

/// A loaded project: its manifest, descriptor with the chosen profiles
/// active, and the catalog it resolves against.
pub struct Session {
    pub root_dir: PathBuf,
    pub manifest: Manifest,
    pub project: ProjectDescriptor,
    pub catalog: CatalogLookup,
}

impl Session {
    /// Load the project at `manifest_path`.
    ///
    /// `profiles` selects active profiles in order; `None` activates all.
    pub fn open(
        manifest_path: &Path,
        profiles: Option<&[String]>,
        config: &GlobalConfig,
        cache: &CatalogCache,
    ) -> miette::Result<Self> {
        if !manifest_path.is_file() {
            return Err(DepsetsError::Manifest {
                message: format!("No project descriptor found at {}", manifest_path.display()),
            }
            .into());
        }
        let manifest_path = manifest_path.canonicalize().map_err(DepsetsError::Io)?;
        let root_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let manifest = Manifest::from_path(&manifest_path)?;
        let project = manifest.descriptor(profiles)?;
        let catalog = cache.lookup(&root_dir, &config.catalog)?;

        if catalog.is_unavailable() {
            status_warn(
                "Notice",
                &format!(
                    "no {} found and no umbrella modules; dependency sets cannot be expanded",
                    config.catalog.file_name
                ),
            );
        }

        Ok(Self {
            root_dir,
            manifest,
            project,
            catalog,
        })
    }
}
