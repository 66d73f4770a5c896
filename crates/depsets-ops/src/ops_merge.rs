//! Operation: expand dependency sets into a project's dependency lists.

use std::path::Path;
use std::str::FromStr;

use depsets_core::cache::CatalogCache;
use depsets_core::config::GlobalConfig;
use depsets_core::dependency::DependencySpec;
use depsets_core::profile::Profile;
use depsets_resolver::merge::{self, MergedProject};
use depsets_util::errors::DepsetsError;
use depsets_util::progress::status;
use serde::Serialize;

use crate::report;
use crate::session::Session;

/// Output format of the merged descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = DepsetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(DepsetsError::Generic {
                message: format!("Unknown output format `{other}` (expected toml or json)"),
            }),
        }
    }
}

/// Options for `depsets merge`.
#[derive(Debug, Default)]
pub struct MergeOptions {
    /// Profiles to activate, in order. `None` activates every profile.
    pub profiles: Option<Vec<String>>,
    pub format: OutputFormat,
}

/// The merged descriptor laid out like a `Project.toml`.
#[derive(Serialize)]
struct MergedDocument<'a> {
    project: ProjectSection<'a>,
    #[serde(skip_serializing_if = "no_profiles")]
    profiles: &'a [Profile],
}

fn no_profiles(profiles: &&[Profile]) -> bool {
    profiles.is_empty()
}

#[derive(Serialize)]
struct ProjectSection<'a> {
    group: &'a str,
    name: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    dependencies: &'a [DependencySpec],
}

/// Merge the project at `manifest_path`, report unknown sets, and print the
/// merged descriptor to stdout.
///
/// Fails if any context hit a cyclic `extends` chain.
pub fn merge(
    manifest_path: &Path,
    opts: &MergeOptions,
    config: &GlobalConfig,
    cache: &CatalogCache,
) -> miette::Result<MergedProject> {
    let session = Session::open(manifest_path, opts.profiles.as_deref(), config, cache)?;
    let merged = merge::merge(&session.project, &session.catalog.catalog);

    report::print_warnings(&merged.warnings);
    let merged = merged.into_result()?;

    let applied: usize = merged
        .contexts
        .iter()
        .filter_map(|c| c.outcome.as_ref().ok())
        .map(|r| r.applied_sets.len())
        .sum();
    status(
        "Merged",
        &format!(
            "{} ({applied} set(s) applied, {} dependencies)",
            merged.project.identity(),
            merged.project.dependencies.len()
        ),
    );

    let rendered = render(
        &merged,
        session.manifest.project.description.as_deref(),
        opts.format,
    )?;
    print!("{rendered}");
    Ok(merged)
}

/// Render the merged descriptor in `format`.
pub fn render(
    merged: &MergedProject,
    description: Option<&str>,
    format: OutputFormat,
) -> miette::Result<String> {
    let project = &merged.project;
    let doc = MergedDocument {
        project: ProjectSection {
            group: &project.group,
            name: &project.name,
            version: &project.version,
            description,
            dependencies: &project.dependencies,
        },
        profiles: &project.profiles,
    };

    match format {
        OutputFormat::Toml => toml::to_string_pretty(&doc).map_err(|e| {
            DepsetsError::Generic {
                message: format!("Failed to serialize merged descriptor: {e}"),
            }
            .into()
        }),
        OutputFormat::Json => serde_json::to_string_pretty(&doc)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| {
                DepsetsError::Generic {
                    message: format!("Failed to serialize merged descriptor: {e}"),
                }
                .into()
            }),
    }
}
