use std::sync::Arc;

use bndl_core::bundle::Bundle;
use bndl_core::config::LookupOptions;
use bndl_core::library::Library;
use bndl_core::requirement::{PackageImport, RequiredBundle};
use miette::Diagnostic;
use thiserror::Error;

/// A repository query that could not be answered.
#[derive(Debug, Error, Diagnostic)]
pub enum RepositoryError {
    #[error("repository '{repository}' is unavailable: {message}")]
    #[diagnostic(help("Check the repository configuration in Bndl.toml"))]
    Unavailable { repository: String, message: String },
}

/// A source of candidate provider bundles.
///
/// Implementations must be safe for concurrent reads; the resolver itself
/// never mutates a repository. Candidates are returned in discovery order,
/// which the resolver preserves among equally ranked providers.
pub trait BundleRepository: Send + Sync {
    fn id(&self) -> &str;

    /// Bundles exporting a package that satisfies `import`.
    fn find_package_providers(
        &self,
        import: &PackageImport,
        options: &LookupOptions,
    ) -> Result<Vec<Arc<Bundle>>, RepositoryError>;

    /// Bundles whose identity satisfies `required`.
    fn find_bundle_providers(
        &self,
        required: &RequiredBundle,
        options: &LookupOptions,
    ) -> Result<Vec<Arc<Bundle>>, RepositoryError>;

    /// Bundles providing any part of an already resolved `library`.
    fn find_library_providers(
        &self,
        library: &Library,
        options: &LookupOptions,
    ) -> Result<Vec<Arc<Bundle>>, RepositoryError>;
}
