//! Shared utilities for depsets.
//!
//! This crate provides cross-cutting concerns used by the other depsets
//! crates: the unified error type, filesystem helpers, and terminal status
//! lines.

pub mod errors;
pub mod fs;
pub mod progress;
