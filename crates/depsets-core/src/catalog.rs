//! The dependency-set catalog: named, reusable bundles of dependencies.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use depsets_util::errors::DepsetsError;
use serde::{Deserialize, Serialize};

use crate::dependency::DependencySpec;

/// Identifier of a dependency set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetId(String);

impl SetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for SetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Where a set definition came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetOrigin {
    /// Authored in the catalog file.
    #[default]
    Catalog,
    /// Synthesized from a sibling module of an umbrella project.
    Sibling,
}

/// A named dependency set in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySetDef {
    pub dependencies: Vec<DependencySpec>,
    /// Sets whose dependencies are applied before this set's own.
    pub extends: Vec<SetId>,
    pub origin: SetOrigin,
}

impl DependencySetDef {
    pub fn new(dependencies: Vec<DependencySpec>) -> Self {
        Self {
            dependencies,
            ..Self::default()
        }
    }

    pub fn extending(mut self, extends: impl IntoIterator<Item = impl Into<SetId>>) -> Self {
        self.extends = extends.into_iter().map(Into::into).collect();
        self
    }
}

/// Table form of a catalog entry.
#[derive(Debug, Deserialize)]
struct TableEntry {
    dependencies: Vec<DependencySpec>,
    #[serde(default)]
    extends: Vec<SetId>,
}

/// Immutable mapping from [`SetId`] to its definition.
///
/// Built once by a loader, then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    sets: BTreeMap<SetId, DependencySetDef>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a set definition.
    pub fn get(&self, id: &SetId) -> Option<&DependencySetDef> {
        self.sets.get(id)
    }

    pub fn contains(&self, id: &SetId) -> bool {
        self.sets.contains_key(id)
    }

    /// All known set ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &SetId> {
        self.sets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SetId, &DependencySetDef)> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Add the entries of `fallback` that this catalog does not define.
    pub fn with_fallback(mut self, fallback: &Catalog) -> Self {
        for (id, def) in &fallback.sets {
            self.sets.entry(id.clone()).or_insert_with(|| def.clone());
        }
        self
    }

    /// Load and parse a catalog file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DepsetsError::Catalog {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse catalog content. `source` names the origin in error messages.
    ///
    /// Every top-level key is a set id. Its value is either a bare dependency
    /// array or a table with `dependencies` and optional `extends` keys.
    pub fn parse(content: &str, source: &str) -> miette::Result<Self> {
        let table: toml::Table = toml::from_str(content).map_err(|e| DepsetsError::Catalog {
            message: format!("Failed to parse {source}: {e}"),
        })?;

        let mut sets = BTreeMap::new();
        for (key, value) in table {
            let def = normalize_entry(value).map_err(|reason| DepsetsError::Catalog {
                message: format!("entry `{key}` in {source} {reason}"),
            })?;
            sets.insert(SetId::new(key), def);
        }
        Ok(Self { sets })
    }
}

impl FromIterator<(SetId, DependencySetDef)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (SetId, DependencySetDef)>>(iter: T) -> Self {
        Self {
            sets: iter.into_iter().collect(),
        }
    }
}

fn normalize_entry(value: toml::Value) -> Result<DependencySetDef, String> {
    match value {
        toml::Value::Array(_) => {
            let dependencies: Vec<DependencySpec> =
                value.try_into().map_err(|e| format!("is invalid: {e}"))?;
            Ok(DependencySetDef::new(dependencies))
        }
        toml::Value::Table(t) => {
            if !t.contains_key("dependencies") {
                return Err("is a table without a `dependencies` key".to_string());
            }
            let entry: TableEntry = toml::Value::Table(t)
                .try_into()
                .map_err(|e| format!("is invalid: {e}"))?;
            Ok(DependencySetDef::new(entry.dependencies).extending(entry.extends))
        }
        other => Err(format!(
            "must be an array or a table, found {}",
            other.type_str()
        )),
    }
}
