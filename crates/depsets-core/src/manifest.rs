use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use depsets_util::errors::DepsetsError;

use crate::catalog::SetId;
use crate::dependency::DependencySpec;
use crate::profile::Profile;
use crate::project::ProjectDescriptor;

/// The parsed representation of a `Project.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project: ProjectMetadata,

    #[serde(default)]
    pub profiles: Vec<Profile>,

    #[serde(default)]
    pub modules: Option<ModulesConfig>,
}

/// Project identity, direct dependencies, and requested sets from `[project]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "dependency-sets")]
    pub dependency_sets: Vec<SetId>,
    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,
}

/// Umbrella configuration from the `[modules]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesConfig {
    /// Module directories relative to the umbrella root; glob patterns allowed.
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Manifest {
    /// Load and parse a `Project.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DepsetsError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a `Project.toml` from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> miette::Result<Self> {
        let manifest: Self = toml::from_str(content).map_err(|e| DepsetsError::Manifest {
            message: format!("Failed to parse Project.toml: {e}"),
        })?;
        manifest.check_profile_names()?;
        Ok(manifest)
    }

    /// Profiles are addressed by name, so each name may be declared once.
    fn check_profile_names(&self) -> Result<(), DepsetsError> {
        let mut seen = HashSet::new();
        for profile in &self.profiles {
            if !seen.insert(profile.name.as_str()) {
                return Err(DepsetsError::Manifest {
                    message: format!("Profile `{}` is declared more than once", profile.name),
                });
            }
        }
        Ok(())
    }

    /// Build the project descriptor with the given profiles activated.
    ///
    /// `None` activates every declared profile in declaration order. `Some`
    /// activates exactly the named profiles, in the order given.
    pub fn descriptor(&self, active: Option<&[String]>) -> miette::Result<ProjectDescriptor> {
        let profiles = match active {
            None => self.profiles.clone(),
            Some(names) => {
                let mut selected: Vec<Profile> = Vec::new();
                for name in names {
                    if selected.iter().any(|p| &p.name == name) {
                        continue;
                    }
                    let profile = self
                        .profiles
                        .iter()
                        .find(|p| &p.name == name)
                        .ok_or_else(|| DepsetsError::Manifest {
                            message: format!(
                                "Unknown profile `{name}` (declared: {})",
                                self.declared_profiles()
                            ),
                        })?;
                    selected.push(profile.clone());
                }
                selected
            }
        };

        Ok(ProjectDescriptor {
            group: self.project.group.clone(),
            name: self.project.name.clone(),
            version: self.project.version.clone(),
            dependency_sets: self.project.dependency_sets.clone(),
            dependencies: self.project.dependencies.clone(),
            profiles,
        })
    }

    fn declared_profiles(&self) -> String {
        if self.profiles.is_empty() {
            return "none".to_string();
        }
        self.profiles
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
