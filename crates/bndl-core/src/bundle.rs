//! Bundles: versioned units that export packages and declare requirements.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use bndl_util::errors::BndlError;
use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::requirement::{LibraryImport, PackageImport, RequiredBundle, Requirement};
use crate::version::{Version, VersionRange};

/// An `Export-Package` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageExport {
    pub package: String,
    #[serde(default)]
    pub version: Version,
}

/// Bundle headers relevant to resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleInfo {
    pub name: String,
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub exports: Vec<PackageExport>,
    #[serde(default)]
    pub imports: Vec<PackageImport>,
    #[serde(default)]
    pub requires: Vec<RequiredBundle>,
    #[serde(default)]
    pub libraries: Vec<LibraryImport>,
}

impl BundleInfo {
    pub fn new(name: &str, version: Version) -> Self {
        Self {
            name: name.to_string(),
            version,
            exports: Vec::new(),
            imports: Vec::new(),
            requires: Vec::new(),
            libraries: Vec::new(),
        }
    }

    pub fn export(mut self, package: &str, version: Version) -> Self {
        self.exports.push(PackageExport {
            package: package.to_string(),
            version,
        });
        self
    }

    pub fn import(mut self, package: &str, versions: VersionRange) -> Self {
        self.imports.push(PackageImport {
            package: package.to_string(),
            versions,
            optional: false,
        });
        self
    }

    pub fn import_optional(mut self, package: &str, versions: VersionRange) -> Self {
        self.imports.push(PackageImport {
            package: package.to_string(),
            versions,
            optional: true,
        });
        self
    }

    pub fn require(mut self, bundle: &str, versions: VersionRange) -> Self {
        self.requires.push(RequiredBundle {
            bundle: bundle.to_string(),
            versions,
            optional: false,
        });
        self
    }

    pub fn library(mut self, library: &str, versions: VersionRange) -> Self {
        self.libraries.push(LibraryImport {
            library: library.to_string(),
            versions,
        });
        self
    }
}

/// Where a bundle's binary lives remotely and where it is cached locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArchive {
    pub source: PathBuf,
    pub cached: PathBuf,
    pub sha256: Option<String>,
}

/// A candidate provider offered by a repository.
///
/// The bundle's requirements are created once, so every traversal of the same
/// bundle sees the same requirement identities.
#[derive(Debug)]
pub struct Bundle {
    id: ElementId,
    info: BundleInfo,
    requirements: Vec<Arc<Requirement>>,
    archive: Option<BundleArchive>,
}

impl Bundle {
    pub fn new(info: BundleInfo) -> Self {
        let requirements = info
            .imports
            .iter()
            .cloned()
            .map(Requirement::from)
            .chain(info.requires.iter().cloned().map(Requirement::from))
            .chain(info.libraries.iter().cloned().map(Requirement::from))
            .map(Arc::new)
            .collect();
        Self {
            id: ElementId::next(),
            info,
            requirements,
            archive: None,
        }
    }

    pub fn with_archive(mut self, archive: BundleArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn info(&self) -> &BundleInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn version(&self) -> &Version {
        &self.info.version
    }

    pub fn archive(&self) -> Option<&BundleArchive> {
        self.archive.as_ref()
    }

    /// Number of declared package imports.
    pub fn import_count(&self) -> usize {
        self.info.imports.len()
    }

    /// Imports, required bundles and library imports, in that order.
    pub fn requirements(&self) -> &[Arc<Requirement>] {
        &self.requirements
    }

    /// The version at which this bundle exports `package`.
    ///
    /// When the package is exported more than once, the highest version inside
    /// `versions` wins; if none lies inside it, the highest exported version.
    pub fn export_version(&self, package: &str, versions: &VersionRange) -> Option<&Version> {
        let named: Vec<&Version> = self
            .info
            .exports
            .iter()
            .filter(|pe| pe.package == package)
            .map(|pe| &pe.version)
            .collect();
        named
            .iter()
            .copied()
            .filter(|v| versions.contains(v))
            .max()
            .or_else(|| named.iter().copied().max())
    }

    pub fn exports_package(&self, package: &str, versions: &VersionRange) -> bool {
        self.info
            .exports
            .iter()
            .any(|pe| pe.package == package && versions.contains(&pe.version))
    }

    /// Whether the bundle's binary is available locally.
    ///
    /// Bundles without an archive have nothing to fetch and always count as local.
    pub fn is_synchronized(&self) -> bool {
        match &self.archive {
            Some(archive) => archive.cached.is_file(),
            None => true,
        }
    }

    /// Copy the bundle's archive into its local cache location, verifying the
    /// checksum when one is declared.
    pub fn synchronize(&self) -> Result<(), BndlError> {
        let Some(archive) = &self.archive else {
            return Ok(());
        };
        if archive.cached.is_file() && self.cached_copy_is_valid(archive)? {
            return Ok(());
        }

        tracing::debug!(bundle = %self, from = %archive.source.display(), "synchronizing");
        bndl_util::fs::copy_file(&archive.source, &archive.cached).map_err(|e| {
            BndlError::Sync {
                message: format!("{self}: cannot copy {}: {e}", archive.source.display()),
            }
        })?;

        if !self.cached_copy_is_valid(archive)? {
            let _ = std::fs::remove_file(&archive.cached);
            return Err(BndlError::Sync {
                message: format!("{self}: checksum mismatch for {}", archive.source.display()),
            });
        }
        Ok(())
    }

    fn cached_copy_is_valid(&self, archive: &BundleArchive) -> Result<bool, BndlError> {
        match &archive.sha256 {
            Some(expected) => Ok(bndl_util::hash::verify_sha256(&archive.cached, expected)?),
            None => Ok(true),
        }
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.info.name, self.info.version)
    }
}
