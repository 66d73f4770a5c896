//! Graphviz DOT rendering of the visualization graph.

use std::fmt::Write;

use depsets_resolver::graph::{NodeShape, VizGraph};

fn shape(shape: NodeShape) -> &'static str {
    match shape {
        NodeShape::Project => "doubleoctagon",
        NodeShape::Artifact => "box",
        NodeShape::Set => "ellipse",
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render `graph` as a DOT digraph, nodes and edges in insertion order.
pub fn to_dot(graph: &VizGraph) -> String {
    let name = graph
        .root()
        .map(|root| graph.node(root).label.as_str())
        .unwrap_or("dependencies");

    let mut out = String::new();
    let _ = writeln!(out, "digraph \"{}\" {{", escape(name));
    out.push_str("    rankdir=LR;\n");
    for node in graph.nodes() {
        let _ = writeln!(
            out,
            "    {} [label=\"{}\", shape={}];",
            node.id,
            escape(&node.label),
            shape(node.shape)
        );
    }
    for (from, to) in graph.edges() {
        let _ = writeln!(out, "    {from} -> {to};");
    }
    out.push_str("}\n");
    out
}
