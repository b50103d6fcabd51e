//! A repository backed by an in-memory list of bundles.

use std::sync::Arc;

use bndl_core::bundle::Bundle;
use bndl_core::config::LookupOptions;
use bndl_core::library::Library;
use bndl_core::requirement::{PackageImport, RequiredBundle};

use crate::repository::{BundleRepository, RepositoryError};

/// Bundles held in memory, searched in insertion order.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    id: String,
    bundles: Vec<Arc<Bundle>>,
}

impl MemoryRepository {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            bundles: Vec::new(),
        }
    }

    pub fn with_bundles(id: &str, bundles: Vec<Arc<Bundle>>) -> Self {
        Self {
            id: id.to_string(),
            bundles,
        }
    }

    /// Add a bundle and return the shared handle the repository will offer.
    pub fn add(&mut self, bundle: Bundle) -> Arc<Bundle> {
        let bundle = Arc::new(bundle);
        self.bundles.push(bundle.clone());
        bundle
    }

    pub fn bundles(&self) -> &[Arc<Bundle>] {
        &self.bundles
    }

    fn select<F>(&self, options: &LookupOptions, matches: F) -> Vec<Arc<Bundle>>
    where
        F: Fn(&Bundle) -> bool,
    {
        self.bundles
            .iter()
            .filter(|b| !options.local_only || b.is_synchronized())
            .filter(|b| matches(b))
            .cloned()
            .collect()
    }
}

impl BundleRepository for MemoryRepository {
    fn id(&self) -> &str {
        &self.id
    }

    fn find_package_providers(
        &self,
        import: &PackageImport,
        options: &LookupOptions,
    ) -> Result<Vec<Arc<Bundle>>, RepositoryError> {
        let found = self.select(options, |b| b.exports_package(&import.package, &import.versions));
        tracing::trace!(repository = %self.id, package = %import.package, found = found.len(), "package lookup");
        Ok(found)
    }

    fn find_bundle_providers(
        &self,
        required: &RequiredBundle,
        options: &LookupOptions,
    ) -> Result<Vec<Arc<Bundle>>, RepositoryError> {
        let found = self.select(options, |b| {
            b.name() == required.bundle && required.versions.contains(b.version())
        });
        tracing::trace!(repository = %self.id, bundle = %required.bundle, found = found.len(), "bundle lookup");
        Ok(found)
    }

    fn find_library_providers(
        &self,
        library: &Library,
        options: &LookupOptions,
    ) -> Result<Vec<Arc<Bundle>>, RepositoryError> {
        let found = self.select(options, |b| {
            library
                .imports
                .iter()
                .any(|pi| b.exports_package(&pi.package, &pi.versions))
                || library
                    .requires
                    .iter()
                    .any(|rb| b.name() == rb.bundle && rb.versions.contains(b.version()))
        });
        tracing::trace!(repository = %self.id, library = %library.name, found = found.len(), "library lookup");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bndl_core::bundle::{BundleArchive, BundleInfo};
    use bndl_core::version::{Version, VersionRange};

    fn import(package: &str, range: &str) -> PackageImport {
        PackageImport {
            package: package.to_string(),
            versions: VersionRange::parse(range).unwrap(),
            optional: false,
        }
    }

    fn repo() -> MemoryRepository {
        let mut repo = MemoryRepository::new("test");
        repo.add(Bundle::new(
            BundleInfo::new("api-one", Version::new(1, 0, 0))
                .export("com.acme.api", Version::new(1, 0, 0)),
        ));
        repo.add(Bundle::new(
            BundleInfo::new("api-two", Version::new(2, 0, 0))
                .export("com.acme.api", Version::new(2, 0, 0)),
        ));
        repo.add(Bundle::new(
            BundleInfo::new("org.slf4j.api", Version::new(1, 7, 36))
                .export("org.slf4j", Version::new(1, 7, 36)),
        ));
        repo
    }

    #[test]
    fn package_lookup_honors_range() {
        let repo = repo();
        let opts = LookupOptions::default();
        let all = repo
            .find_package_providers(&import("com.acme.api", ""), &opts)
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name(), "api-one");

        let two = repo
            .find_package_providers(&import("com.acme.api", "[2.0,3.0)"), &opts)
            .unwrap();
        assert_eq!(two.len(), 1);
        assert_eq!(two[0].name(), "api-two");
    }

    #[test]
    fn bundle_lookup_matches_name_and_version() {
        let repo = repo();
        let required = RequiredBundle {
            bundle: "org.slf4j.api".to_string(),
            versions: VersionRange::parse("[1.7,2.0)").unwrap(),
            optional: false,
        };
        let found = repo
            .find_bundle_providers(&required, &LookupOptions::default())
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].version(), &Version::new(1, 7, 36));
    }

    #[test]
    fn library_lookup_matches_any_member() {
        let repo = repo();
        let library = Library {
            name: "logging".to_string(),
            version: Version::new(1, 0, 0),
            imports: vec![import("org.slf4j", "1.7")],
            requires: vec![],
        };
        let found = repo
            .find_library_providers(&library, &LookupOptions::default())
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "org.slf4j.api");
    }

    #[test]
    fn local_only_skips_unsynchronized_bundles() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut repo = MemoryRepository::new("remote");
        repo.add(
            Bundle::new(
                BundleInfo::new("remote-api", Version::new(1, 0, 0))
                    .export("com.acme.api", Version::new(1, 0, 0)),
            )
            .with_archive(BundleArchive {
                source: tmp.path().join("remote-api.jar"),
                cached: tmp.path().join("cache").join("remote-api.jar"),
                sha256: None,
            }),
        );

        let local = LookupOptions { local_only: true };
        let found = repo
            .find_package_providers(&import("com.acme.api", ""), &local)
            .unwrap();
        assert!(found.is_empty());

        let found = repo
            .find_package_providers(&import("com.acme.api", ""), &LookupOptions::default())
            .unwrap();
        assert_eq!(found.len(), 1);
    }
}
