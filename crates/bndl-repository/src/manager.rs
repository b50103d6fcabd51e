//! Priority tiers of repositories, and library lookup.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use bndl_core::library::Library;
use bndl_core::manifest::Workspace;
use bndl_core::requirement::LibraryImport;

use crate::memory::MemoryRepository;
use crate::repository::BundleRepository;

/// Groups repositories into priority levels and resolves library references.
pub trait RepositoryManager: Send + Sync {
    /// Priority levels in search order (lowest value first).
    fn priority_levels(&self) -> Vec<i32>;

    /// Repositories registered at `level`, in registration order.
    fn repositories_at(&self, level: i32) -> Vec<Arc<dyn BundleRepository>>;

    /// The library a library import refers to, if any is known.
    fn resolve_library(&self, import: &LibraryImport) -> Option<Arc<Library>>;
}

/// The standard [`RepositoryManager`]: a sorted map of priority tiers plus a
/// set of known libraries.
#[derive(Default)]
pub struct RepositoryRegistry {
    tiers: BTreeMap<i32, Vec<Arc<dyn BundleRepository>>>,
    libraries: Vec<Arc<Library>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repository(&mut self, priority: i32, repository: Arc<dyn BundleRepository>) {
        tracing::debug!(repository = repository.id(), priority, "registering repository");
        self.tiers.entry(priority).or_default().push(repository);
    }

    pub fn add_library(&mut self, library: Library) {
        self.libraries.push(Arc::new(library));
    }

    pub fn repository_count(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    /// Build a registry from a workspace description. Relative archive and
    /// cache paths are resolved against `base_dir`.
    pub fn from_workspace(workspace: &Workspace, base_dir: &Path) -> Self {
        let mut registry = Self::new();
        for entry in &workspace.repositories {
            let cache_dir = entry.cache_dir(base_dir);
            let bundles = entry
                .bundles
                .iter()
                .map(|b| Arc::new(b.to_bundle(base_dir, &cache_dir)))
                .collect();
            registry.add_repository(
                entry.priority,
                Arc::new(MemoryRepository::with_bundles(&entry.id, bundles)),
            );
        }
        for library in &workspace.libraries {
            registry.add_library(library.clone());
        }
        registry
    }
}

impl RepositoryManager for RepositoryRegistry {
    fn priority_levels(&self) -> Vec<i32> {
        self.tiers.keys().copied().collect()
    }

    fn repositories_at(&self, level: i32) -> Vec<Arc<dyn BundleRepository>> {
        self.tiers.get(&level).cloned().unwrap_or_default()
    }

    /// Picks the highest version among libraries with the imported name whose
    /// version lies in the import's range.
    fn resolve_library(&self, import: &LibraryImport) -> Option<Arc<Library>> {
        self.libraries
            .iter()
            .filter(|lib| lib.name == import.library && import.versions.contains(&lib.version))
            .max_by(|a, b| a.version.cmp(&b.version))
            .cloned()
    }
}
