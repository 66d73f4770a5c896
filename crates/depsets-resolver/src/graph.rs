//! Visualization graph: nodes for the project, its artifacts and its
//! dependency sets, with edges showing how each was pulled in.

use std::collections::HashMap;
use std::fmt;

use depsets_core::catalog::SetId;
use depsets_core::dependency::ArtifactId;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Stable identifier of a node within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// How a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    Project,
    Artifact,
    Set,
}

/// Identity a node is deduplicated on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Project,
    Artifact(ArtifactId),
    Set(SetId),
}

/// A node in the visualization graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VizNode {
    pub id: NodeId,
    pub label: String,
    pub shape: NodeShape,
}

/// A visualization graph backed by petgraph.
///
/// Nodes and edges are kept in insertion order, which is the order in which
/// they were discovered.
#[derive(Debug, Clone)]
pub struct VizGraph {
    graph: DiGraph<VizNode, ()>,
    /// Lookup from node identity to node index.
    index: HashMap<NodeKey, NodeIndex>,
    root: Option<NodeIndex>,
}

impl VizGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            root: None,
        }
    }

    /// Add or retrieve a node. If the key already exists, returns the
    /// existing index and keeps the first label.
    pub fn add_node(&mut self, key: NodeKey, label: String, shape: NodeShape) -> NodeIndex {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let id = NodeId(self.graph.node_count());
        let idx = self.graph.add_node(VizNode { id, label, shape });
        self.index.insert(key, idx);
        idx
    }

    /// Set the root node of the graph (the project itself).
    pub fn set_root(&mut self, idx: NodeIndex) {
        self.root = Some(idx);
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Add an edge from `from` to `to`, unless one already exists.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Look up a node by identity.
    pub fn find(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    /// Get the node data for an index.
    pub fn node(&self, idx: NodeIndex) -> &VizNode {
        &self.graph[idx]
    }

    /// Node table, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &VizNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edge list as `(from, to)` node ids, in insertion order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()].id, self.graph[e.target()].id))
            .collect()
    }

    /// Nodes with an edge into `idx`.
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect()
    }

    /// Nodes `idx` has an edge to.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for VizGraph {
    fn default() -> Self {
        Self::new()
    }
}
