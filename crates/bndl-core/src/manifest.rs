use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bndl_util::errors::BndlError;

use crate::bundle::{Bundle, BundleArchive, BundleInfo};
use crate::config::ResolveConfig;
use crate::element::{Compound, Element};
use crate::library::Library;

/// The parsed representation of a `Bndl.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub project: ProjectSection,

    #[serde(default)]
    pub resolve: ResolveConfig,

    #[serde(default, rename = "repository")]
    pub repositories: Vec<RepositoryEntry>,

    #[serde(default, rename = "library")]
    pub libraries: Vec<Library>,
}

/// The `[project]` section: the root of every resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    #[serde(default, rename = "bundle")]
    pub bundles: Vec<BundleEntry>,
}

/// A `[[repository]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub id: String,
    /// Lower values are searched first.
    #[serde(default)]
    pub priority: i32,
    /// Where archives of this repository's bundles are cached.
    #[serde(default)]
    pub cache: Option<PathBuf>,
    #[serde(default, rename = "bundle")]
    pub bundles: Vec<BundleEntry>,
}

/// A bundle declaration, optionally backed by an archive file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleEntry {
    #[serde(flatten)]
    pub info: BundleInfo,
    #[serde(default)]
    pub archive: Option<PathBuf>,
    #[serde(default)]
    pub sha256: Option<String>,
}

impl BundleEntry {
    /// Build the bundle. Relative archive paths are resolved against `base_dir`,
    /// and the cached copy is placed under `cache_dir`.
    pub fn to_bundle(&self, base_dir: &Path, cache_dir: &Path) -> Bundle {
        let bundle = Bundle::new(self.info.clone());
        match &self.archive {
            Some(archive) => {
                let file_name = format!("{}-{}.jar", self.info.name, self.info.version);
                bundle.with_archive(BundleArchive {
                    source: base_dir.join(archive),
                    cached: cache_dir.join(file_name),
                    sha256: self.sha256.clone(),
                })
            }
            None => bundle,
        }
    }
}

impl RepositoryEntry {
    /// The cache directory for this repository, defaulting to
    /// `.bndl/cache/<id>` under `base_dir`.
    pub fn cache_dir(&self, base_dir: &Path) -> PathBuf {
        match &self.cache {
            Some(dir) => base_dir.join(dir),
            None => base_dir.join(".bndl").join("cache").join(&self.id),
        }
    }
}

impl Workspace {
    /// Load and validate a `Bndl.toml` from disk.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BndlError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a `Bndl.toml` from a string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        let workspace: Workspace = toml::from_str(content).map_err(|e| BndlError::Manifest {
            message: format!("Failed to parse Bndl.toml: {e}"),
        })?;
        workspace.validate()?;
        Ok(workspace)
    }

    fn validate(&self) -> Result<(), BndlError> {
        let mut ids = HashSet::new();
        for repo in &self.repositories {
            if !ids.insert(repo.id.as_str()) {
                return Err(BndlError::Manifest {
                    message: format!("duplicate repository id '{}'", repo.id),
                });
            }
        }
        let mut libraries = HashSet::new();
        for lib in &self.libraries {
            if !libraries.insert((lib.name.as_str(), &lib.version)) {
                return Err(BndlError::Manifest {
                    message: format!("duplicate library '{} {}'", lib.name, lib.version),
                });
            }
        }
        Ok(())
    }

    /// The project as a compound element whose children are its bundles.
    pub fn root_element(&self) -> Element {
        let children = self
            .project
            .bundles
            .iter()
            .map(|entry| Element::Bundle(Arc::new(Bundle::new(entry.info.clone()))))
            .collect();
        Element::Compound(Compound::with_children(&self.project.name, children))
    }
}
