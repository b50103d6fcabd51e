//! Core data types for bndl.
//!
//! This crate defines the model the resolver works on: OSGi versions and
//! ranges, requirements, bundles, libraries, compound elements, resolution
//! settings, and the `Bndl.toml` workspace description.
//!
//! This crate is intentionally free of resolution logic.

pub mod bundle;
pub mod config;
pub mod element;
pub mod library;
pub mod manifest;
pub mod requirement;
pub mod version;

/// File name of the workspace description.
pub const MANIFEST_FILE: &str = "Bndl.toml";
