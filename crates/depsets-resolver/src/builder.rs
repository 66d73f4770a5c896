//! Builds the visualization graph of how a project's dependencies were
//! assembled from its direct declarations and its dependency sets.

use std::collections::{HashSet, VecDeque};

use depsets_core::catalog::{Catalog, SetId};
use depsets_core::dependency::DependencySpec;
use depsets_core::project::ProjectDescriptor;
use petgraph::graph::NodeIndex;

use crate::graph::{NodeKey, NodeShape, VizGraph};
use crate::merge::dedupe;

/// Build the graph for `project` against `catalog`.
///
/// The root links to every direct dependency (base and active profiles) and
/// every requested set. Sets link to their dependencies and to the sets they
/// extend. Artifacts and sets are one node each however often they are
/// referenced. Unknown set ids produce no node.
pub fn build_graph(project: &ProjectDescriptor, catalog: &Catalog) -> VizGraph {
    let mut graph = VizGraph::new();
    let root = graph.add_node(
        NodeKey::Project,
        format!("{}:{}", project.identity(), project.version),
        NodeShape::Project,
    );
    graph.set_root(root);

    let direct = dedupe(
        project
            .dependencies
            .iter()
            .chain(project.profiles.iter().flat_map(|p| p.dependencies.iter()))
            .cloned(),
    );
    for dep in &direct {
        let node = artifact_node(&mut graph, dep);
        graph.add_edge(root, node);
    }

    let mut queue: VecDeque<(&SetId, NodeIndex)> = project
        .dependency_sets
        .iter()
        .chain(project.profiles.iter().flat_map(|p| p.dependency_sets.iter()))
        .map(|id| (id, root))
        .collect();
    let mut visited: HashSet<&SetId> = HashSet::new();

    while let Some((id, parent)) = queue.pop_front() {
        if !visited.insert(id) {
            // Already drawn: link the new referrer without expanding again.
            if let Some(existing) = graph.find(&NodeKey::Set(id.clone())) {
                graph.add_edge(parent, existing);
            }
            continue;
        }
        let Some(def) = catalog.get(id) else {
            tracing::debug!("skipping unknown dependency set `{id}` in graph");
            continue;
        };

        let node = graph.add_node(NodeKey::Set(id.clone()), id.to_string(), NodeShape::Set);
        graph.add_edge(parent, node);
        for dep in &def.dependencies {
            let artifact = artifact_node(&mut graph, dep);
            graph.add_edge(node, artifact);
        }
        queue.extend(def.extends.iter().map(|ext| (ext, node)));
    }

    tracing::debug!(
        "built graph for {} with {} node(s) and {} edge(s)",
        project.identity(),
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

fn artifact_node(graph: &mut VizGraph, dep: &DependencySpec) -> NodeIndex {
    graph.add_node(
        NodeKey::Artifact(dep.id.clone()),
        dep.to_string(),
        NodeShape::Artifact,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsets_core::catalog::DependencySetDef;
    use depsets_core::dependency::ArtifactId;
    use depsets_core::profile::Profile;

    fn deps(list: &[&str]) -> Vec<DependencySpec> {
        list.iter()
            .map(|s| DependencySpec::parse(s).unwrap())
            .collect()
    }

    fn artifact(graph: &VizGraph, group: &str, name: &str) -> NodeIndex {
        graph
            .find(&NodeKey::Artifact(ArtifactId::new(group, name)))
            .unwrap()
    }

    fn set_node(graph: &VizGraph, id: &str) -> Option<NodeIndex> {
        graph.find(&NodeKey::Set(SetId::from(id)))
    }

    #[test]
    fn direct_and_set_reference_collapse_to_one_node() {
        let catalog: Catalog = [(
            SetId::from("s"),
            DependencySetDef::new(deps(&["org:x:1", "org:y:1"])),
        )]
        .into_iter()
        .collect();
        let mut project = ProjectDescriptor::new("com.example", "app", "1.0");
        project.dependencies = deps(&["org:x:1"]);
        project.dependency_sets = vec![SetId::from("s")];

        let graph = build_graph(&project, &catalog);
        let root = graph.root().unwrap();
        let s = set_node(&graph, "s").unwrap();
        let x = artifact(&graph, "org", "x");
        let y = artifact(&graph, "org", "y");

        let mut x_in = graph.dependents_of(x);
        x_in.sort();
        assert_eq!(x_in, vec![root, s]);
        assert_eq!(graph.dependents_of(y), vec![s]);
        assert_eq!(graph.dependents_of(s), vec![root]);
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn root_and_shapes() {
        let project = ProjectDescriptor::new("com.example", "app", "1.0");
        let graph = build_graph(&project, &Catalog::new());
        let root = graph.root().unwrap();
        assert_eq!(graph.node(root).label, "com.example:app:1.0");
        assert_eq!(graph.node(root).shape, NodeShape::Project);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn extended_sets_hang_off_the_extending_set() {
        let catalog: Catalog = [
            (SetId::from("base"), DependencySetDef::new(deps(&["org:b:1"]))),
            (
                SetId::from("web"),
                DependencySetDef::new(deps(&["org:w:1"])).extending(["base"]),
            ),
        ]
        .into_iter()
        .collect();
        let mut project = ProjectDescriptor::new("com.example", "app", "1.0");
        project.dependency_sets = vec![SetId::from("web")];

        let graph = build_graph(&project, &catalog);
        let web = set_node(&graph, "web").unwrap();
        let base = set_node(&graph, "base").unwrap();
        assert_eq!(graph.dependents_of(base), vec![web]);
        assert_eq!(graph.node(base).shape, NodeShape::Set);
        assert_eq!(graph.dependents_of(artifact(&graph, "org", "b")), vec![base]);
    }

    #[test]
    fn set_requested_directly_and_extended_gets_both_edges() {
        let catalog: Catalog = [
            (SetId::from("base"), DependencySetDef::new(deps(&["org:b:1"]))),
            (
                SetId::from("web"),
                DependencySetDef::new(Vec::new()).extending(["base"]),
            ),
        ]
        .into_iter()
        .collect();
        let mut project = ProjectDescriptor::new("com.example", "app", "1.0");
        project.dependency_sets = vec![SetId::from("base"), SetId::from("web")];

        let graph = build_graph(&project, &catalog);
        let root = graph.root().unwrap();
        let base = set_node(&graph, "base").unwrap();
        let web = set_node(&graph, "web").unwrap();
        let mut base_in = graph.dependents_of(base);
        base_in.sort();
        assert_eq!(base_in, vec![root, web]);
        // expanded once: a single edge from base to its artifact
        assert_eq!(graph.dependencies_of(base).len(), 1);
    }

    #[test]
    fn unknown_sets_are_skipped() {
        let mut project = ProjectDescriptor::new("com.example", "app", "1.0");
        project.dependency_sets = vec![SetId::from("ghost"), SetId::from("ghost")];
        let graph = build_graph(&project, &Catalog::new());
        assert!(set_node(&graph, "ghost").is_none());
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn profiles_contribute_direct_deps_and_sets() {
        let catalog: Catalog = [(
            SetId::from("testing"),
            DependencySetDef::new(deps(&["junit:junit:4.13.2"])),
        )]
        .into_iter()
        .collect();
        let mut project = ProjectDescriptor::new("com.example", "app", "1.0");
        project.dependencies = deps(&["org:x:1"]);
        let mut dev = Profile::new("dev");
        dev.dependencies = deps(&["org:x:2", "junit:junit:4.12"]);
        dev.dependency_sets = vec![SetId::from("testing")];
        project.profiles.push(dev);

        let graph = build_graph(&project, &catalog);
        let root = graph.root().unwrap();
        let x = artifact(&graph, "org", "x");
        assert_eq!(graph.node(x).label, "org:x:1");
        let junit = artifact(&graph, "junit", "junit");
        assert_eq!(graph.node(junit).label, "junit:junit:4.12");
        assert_eq!(graph.dependents_of(junit).len(), 2);
        assert!(graph.dependencies_of(root).contains(&set_node(&graph, "testing").unwrap()));
    }

    #[test]
    fn extends_cycle_terminates() {
        let catalog: Catalog = [
            (
                SetId::from("a"),
                DependencySetDef::new(Vec::new()).extending(["b"]),
            ),
            (
                SetId::from("b"),
                DependencySetDef::new(Vec::new()).extending(["a"]),
            ),
        ]
        .into_iter()
        .collect();
        let mut project = ProjectDescriptor::new("com.example", "app", "1.0");
        project.dependency_sets = vec![SetId::from("a")];

        let graph = build_graph(&project, &catalog);
        let a = set_node(&graph, "a").unwrap();
        let b = set_node(&graph, "b").unwrap();
        assert!(graph.dependents_of(a).contains(&b));
        assert!(graph.dependents_of(b).contains(&a));
    }
}
