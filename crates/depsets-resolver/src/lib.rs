//! Dependency set engine: resolves `extends` chains between dependency sets,
//! merges the resolved sets into each context of a project, and builds the
//! visualization graph of where every dependency came from.

pub mod builder;
pub mod graph;
pub mod merge;
pub mod resolver;
