//! Core data types for depsets.
//!
//! This crate defines the values the resolution engine works on: dependency
//! specifications, named dependency sets and the catalog that holds them,
//! project descriptors with their profiles, and the umbrella workspace whose
//! modules contribute implicit sets. It also owns the loaders that turn
//! `Project.toml` and `dependency-sets.toml` into those values, plus the
//! catalog cache shared by every module resolved in one invocation.
//!
//! This crate is intentionally free of async code and network I/O.

/// File name of a project descriptor.
pub const MANIFEST_FILE: &str = "Project.toml";

/// Default file name of the shared dependency-set catalog.
pub const CATALOG_FILE: &str = "dependency-sets.toml";

pub mod cache;
pub mod catalog;
pub mod config;
pub mod dependency;
pub mod manifest;
pub mod package;
pub mod profile;
pub mod project;
pub mod workspace;
