use serde::{Deserialize, Serialize};

use crate::catalog::SetId;
use crate::dependency::DependencySpec;

/// A named, independently activatable layer of dependencies and requested
/// dependency sets, declared with `[[profiles]]` in `Project.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,

    #[serde(default, rename = "dependency-sets")]
    pub dependency_sets: Vec<SetId>,

    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,
}

impl Profile {
    /// Create an empty profile with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependency_sets: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}
