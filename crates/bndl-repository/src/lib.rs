//! Bundle repositories: the provider-lookup contract the resolver consumes,
//! an in-memory repository, and a registry that groups repositories into
//! priority tiers and resolves library references.

pub mod manager;
pub mod memory;
pub mod repository;

pub use manager::{RepositoryManager, RepositoryRegistry};
pub use memory::MemoryRepository;
pub use repository::{BundleRepository, RepositoryError};
