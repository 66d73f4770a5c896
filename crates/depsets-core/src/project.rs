use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::SetId;
use crate::dependency::{ArtifactId, DependencySpec};
use crate::profile::Profile;

/// A project as seen by resolution: identity, base dependencies and
/// requested sets, and the active profiles in activation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub group: String,
    pub name: String,
    pub version: String,

    #[serde(default, rename = "dependency-sets")]
    pub dependency_sets: Vec<SetId>,

    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
}

impl ProjectDescriptor {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            dependency_sets: Vec::new(),
            dependencies: Vec::new(),
            profiles: Vec::new(),
        }
    }

    /// The project's own artifact identity, `group:name`.
    pub fn identity(&self) -> ArtifactId {
        ArtifactId::new(&self.group, &self.name)
    }

    /// Requested sets and dependencies of `context`, or `None` if the
    /// context names a profile that is not active.
    pub fn context(&self, context: &Context) -> Option<(&[SetId], &[DependencySpec])> {
        match context {
            Context::Base => Some((
                self.dependency_sets.as_slice(),
                self.dependencies.as_slice(),
            )),
            Context::Profile(name) => self
                .profiles
                .iter()
                .find(|p| &p.name == name)
                .map(|p| (p.dependency_sets.as_slice(), p.dependencies.as_slice())),
        }
    }

    /// Base context followed by every active profile, in activation order.
    pub fn contexts(&self) -> Vec<Context> {
        std::iter::once(Context::Base)
            .chain(self.profiles.iter().map(|p| Context::Profile(p.name.clone())))
            .collect()
    }
}

/// One resolution context of a project: its base configuration or a profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Context {
    Base,
    Profile(String),
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Base => f.write_str("base"),
            Context::Profile(name) => write!(f, "profile `{name}`"),
        }
    }
}
