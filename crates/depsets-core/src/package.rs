use std::path::Path;

use crate::dependency::{ArtifactId, DependencySpec};
use crate::manifest::Manifest;

/// One module on disk, identified by its `Project.toml`.
#[derive(Debug, Clone)]
pub struct Package {
    pub manifest: Manifest,
}

impl Package {
    /// Load the package rooted at `dir`.
    pub fn from_dir(dir: &Path) -> miette::Result<Self> {
        let manifest = Manifest::from_path(&dir.join(crate::MANIFEST_FILE))?;
        Ok(Self { manifest })
    }

    /// Returns the package name from the manifest.
    pub fn name(&self) -> &str {
        &self.manifest.project.name
    }

    /// Returns the package version from the manifest.
    pub fn version(&self) -> &str {
        &self.manifest.project.version
    }

    /// Returns the fully-qualified artifact identity, `group:name`.
    pub fn identity(&self) -> ArtifactId {
        ArtifactId::new(&self.manifest.project.group, self.name())
    }

    /// A dependency on this package at its current version.
    pub fn as_dependency(&self) -> DependencySpec {
        DependencySpec::new(&self.manifest.project.group, self.name(), self.version())
    }
}
