//! Shared utilities for bndl.
//!
//! This crate provides cross-cutting concerns used by all other bndl crates:
//! error types, filesystem helpers, cryptographic hashing, and terminal
//! progress indicators.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
