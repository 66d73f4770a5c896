//! Merging resolved dependency sets into a project's dependency lists.
//!
//! Every context (the base configuration, then each active profile) is
//! merged on its own: its authored dependencies first, then the dependencies
//! of each requested set in resolution order, deduplicated by artifact
//! identity with the first occurrence winning. Profiles are then folded into
//! the base list.

use std::collections::HashSet;

use depsets_core::catalog::{Catalog, SetId};
use depsets_core::dependency::{ArtifactId, DependencySpec};
use depsets_core::project::{Context, ProjectDescriptor};
use miette::Diagnostic;
use thiserror::Error;

use crate::resolver::{resolve, ResolveError};

/// Merged dependencies of one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Sets applied, in application order.
    pub applied_sets: Vec<SetId>,
    /// Requested ids that had no catalog entry.
    pub unknown: Vec<SetId>,
    /// Final, deduplicated dependency list of the context.
    pub dependencies: Vec<DependencySpec>,
}

/// Outcome of merging one context.
#[derive(Debug, Clone)]
pub struct ContextResolution {
    pub context: Context,
    pub outcome: Result<ResolutionResult, ResolveError>,
}

/// Requested sets that the catalog does not define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSetsWarning {
    pub project: ArtifactId,
    pub context: Context,
    pub unknown: Vec<SetId>,
    /// Every id the catalog does define, sorted.
    pub known: Vec<SetId>,
}

/// A merge failure attributed to the context it happened in.
#[derive(Debug, Error, Diagnostic)]
#[error("Failed to merge dependency sets for {context} of {project}")]
pub struct MergeError {
    pub project: ArtifactId,
    pub context: Context,
    #[source]
    #[diagnostic_source]
    pub source: ResolveError,
}

/// The result of [`merge`].
#[derive(Debug, Clone)]
pub struct MergedProject {
    /// The descriptor with every context's dependencies merged, profiles
    /// folded into the base list, and requested-set lists emptied.
    pub project: ProjectDescriptor,
    /// The descriptor as it was before any set was expanded.
    pub pre_expansion: ProjectDescriptor,
    /// Per-context outcomes: base first, then profiles in activation order.
    pub contexts: Vec<ContextResolution>,
    pub warnings: Vec<UnknownSetsWarning>,
}

impl MergedProject {
    /// Contexts whose resolution failed.
    pub fn failures(&self) -> impl Iterator<Item = (&Context, &ResolveError)> {
        self.contexts
            .iter()
            .filter_map(|c| c.outcome.as_ref().err().map(|e| (&c.context, e)))
    }

    /// Fail with the first per-context error, if any.
    pub fn into_result(self) -> Result<Self, MergeError> {
        let first = self
            .failures()
            .next()
            .map(|(context, error)| (context.clone(), error.clone()));
        match first {
            Some((context, source)) => Err(MergeError {
                project: self.project.identity(),
                context,
                source,
            }),
            None => Ok(self),
        }
    }
}

/// Merge every context of `project` against `catalog`.
///
/// Never mutates `project`. A failure in one context leaves that context's
/// dependencies as authored and does not affect the others.
pub fn merge(project: &ProjectDescriptor, catalog: &Catalog) -> MergedProject {
    let mut merged = project.clone();
    let mut contexts = Vec::new();
    let mut warnings = Vec::new();

    for context in project.contexts() {
        let Some((requested, dependencies)) = project.context(&context) else {
            continue;
        };
        let outcome = merge_context(catalog, requested, dependencies);

        let (merged_deps, expanded) = match &outcome {
            Ok(result) => {
                if !result.unknown.is_empty() {
                    tracing::debug!(
                        "{}: unknown dependency set(s) in {context}: {}",
                        project.identity(),
                        join(&result.unknown)
                    );
                    warnings.push(UnknownSetsWarning {
                        project: project.identity(),
                        context: context.clone(),
                        unknown: result.unknown.clone(),
                        known: catalog.ids().cloned().collect(),
                    });
                }
                (result.dependencies.clone(), true)
            }
            Err(e) => {
                tracing::debug!("{}: {context} left unmerged: {e}", project.identity());
                (dependencies.to_vec(), false)
            }
        };
        write_context(&mut merged, &context, merged_deps, expanded);
        contexts.push(ContextResolution { context, outcome });
    }

    // Profiles contribute additively to the effective base list.
    let folded = dedupe(
        merged
            .dependencies
            .iter()
            .chain(merged.profiles.iter().flat_map(|p| p.dependencies.iter()))
            .cloned(),
    );
    merged.dependencies = folded;

    MergedProject {
        project: merged,
        pre_expansion: project.clone(),
        contexts,
        warnings,
    }
}

/// Merge one context: `dependencies` followed by the dependencies of every
/// set `requested` resolves to, deduplicated.
///
/// An empty request passes `dependencies` through unchanged.
pub fn merge_context(
    catalog: &Catalog,
    requested: &[SetId],
    dependencies: &[DependencySpec],
) -> Result<ResolutionResult, ResolveError> {
    if requested.is_empty() {
        return Ok(ResolutionResult {
            applied_sets: Vec::new(),
            unknown: Vec::new(),
            dependencies: dependencies.to_vec(),
        });
    }

    let resolution = resolve(catalog, requested)?;
    let from_sets = resolution
        .ordered
        .iter()
        .filter_map(|id| catalog.get(id))
        .flat_map(|def| def.dependencies.iter());

    Ok(ResolutionResult {
        dependencies: dedupe(dependencies.iter().chain(from_sets).cloned()),
        applied_sets: resolution.ordered,
        unknown: resolution.unknown,
    })
}

/// Drop every dependency whose artifact identity already occurred earlier.
pub fn dedupe(dependencies: impl IntoIterator<Item = DependencySpec>) -> Vec<DependencySpec> {
    let mut seen: HashSet<ArtifactId> = HashSet::new();
    dependencies
        .into_iter()
        .filter(|dep| seen.insert(dep.id.clone()))
        .collect()
}

/// Store the merged list of `context`. Requested sets are cleared only once
/// they have been expanded, so an unmerged context keeps its request.
fn write_context(
    project: &mut ProjectDescriptor,
    context: &Context,
    deps: Vec<DependencySpec>,
    expanded: bool,
) {
    let (dependencies, requested) = match context {
        Context::Base => (&mut project.dependencies, &mut project.dependency_sets),
        Context::Profile(name) => match project.profiles.iter_mut().find(|p| &p.name == name) {
            Some(profile) => (&mut profile.dependencies, &mut profile.dependency_sets),
            None => return,
        },
    };
    *dependencies = deps;
    if expanded {
        requested.clear();
    }
}

fn join(ids: &[SetId]) -> String {
    ids.iter().map(SetId::as_str).collect::<Vec<_>>().join(", ")
}
