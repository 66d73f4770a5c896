use std::fmt;

use serde::{Deserialize, Serialize};

/// A dependency as authored in `Project.toml` or `dependency-sets.toml`.
///
/// Supports both shorthand (`"group:artifact:version"`) and detailed forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Short(String),
    Detailed(DetailedDependency),
}

/// A dependency with explicit group, artifact, version, and optional metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<DependencyScope>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<Exclusion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

/// A transitive dependency to exclude.
///
/// Carried through resolution untouched; nothing in depsets acts on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

/// Maven-compatible dependency scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    #[default]
    Compile,
    Runtime,
    Provided,
    Test,
}

/// Maven coordinates parsed from a shorthand string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl MavenCoordinate {
    /// Parse `"group:artifact:version"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
            Some(Self {
                group_id: parts[0].to_string(),
                artifact_id: parts[1].to_string(),
                version: parts[2].to_string(),
            })
        } else {
            None
        }
    }
}

impl fmt::Display for MavenCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// The identity of an artifact: `group:artifact`, without a version.
///
/// Two dependencies with the same identity are the same dependency,
/// whatever their versions or options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId {
    pub group: String,
    pub artifact: String,
}

impl ArtifactId {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// Options attached to a dependency that resolution never looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyOptions {
    pub scope: Option<DependencyScope>,
    pub optional: bool,
    pub exclusions: Vec<Exclusion>,
    pub classifier: Option<String>,
}

impl DependencyOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A normalized dependency: identity, version, and opaque options.
///
/// Deserializes from either authored [`Dependency`] form and serializes back
/// to the shorthand form whenever it carries no options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Dependency", into = "Dependency")]
pub struct DependencySpec {
    pub id: ArtifactId,
    pub version: String,
    pub options: DependencyOptions,
}

impl DependencySpec {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: ArtifactId::new(group, artifact),
            version: version.into(),
            options: DependencyOptions::default(),
        }
    }

    /// Parse a `"group:artifact:version"` shorthand.
    pub fn parse(s: &str) -> Option<Self> {
        MavenCoordinate::parse(s).map(|c| Self::new(c.group_id, c.artifact_id, c.version))
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.version)
    }
}

impl TryFrom<Dependency> for DependencySpec {
    type Error = String;

    fn try_from(dep: Dependency) -> Result<Self, Self::Error> {
        match dep {
            Dependency::Short(s) => Self::parse(&s).ok_or_else(|| {
                format!("invalid dependency `{s}`: expected `group:artifact:version`")
            }),
            Dependency::Detailed(d) => Ok(Self {
                id: ArtifactId::new(d.group, d.artifact),
                version: d.version,
                options: DependencyOptions {
                    scope: d.scope,
                    optional: d.optional,
                    exclusions: d.exclusions,
                    classifier: d.classifier,
                },
            }),
        }
    }
}

impl From<DependencySpec> for Dependency {
    fn from(spec: DependencySpec) -> Self {
        if spec.options.is_empty() {
            return Dependency::Short(spec.to_string());
        }
        let DependencyOptions {
            scope,
            optional,
            exclusions,
            classifier,
        } = spec.options;
        Dependency::Detailed(DetailedDependency {
            group: spec.id.group,
            artifact: spec.id.artifact,
            version: spec.version,
            scope,
            optional,
            exclusions,
            classifier,
        })
    }
}
