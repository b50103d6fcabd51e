//! Bundle resolution engine.
//!
//! Walks a model element tree, finds a provider bundle for every requirement
//! by searching repositories tier by tier, ranks competing providers, and
//! backtracks when a provider's own requirements cannot be satisfied.

mod context;
pub mod error;
pub mod monitor;
pub mod order;
pub mod resolution;
pub mod resolver;

pub use error::{ResolutionError, ResolveError};
pub use monitor::{NullMonitor, ResolutionMonitor, TracingMonitor};
pub use resolution::{Association, Resolution, SyncReport};
pub use resolver::BundleResolver;
