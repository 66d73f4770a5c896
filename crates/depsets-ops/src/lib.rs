pub mod dot;
pub mod ops_graph;
pub mod ops_merge;
pub mod ops_sets;
pub mod report;
pub mod session;
