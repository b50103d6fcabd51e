//! Requirements a bundle or project declares: package imports, required
//! bundles, and library imports.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::library::Library;
use crate::version::VersionRange;

/// An `Import-Package` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageImport {
    pub package: String,
    #[serde(default, rename = "version")]
    pub versions: VersionRange,
    #[serde(default)]
    pub optional: bool,
}

/// A `Require-Bundle` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredBundle {
    pub bundle: String,
    #[serde(default, rename = "version")]
    pub versions: VersionRange,
    #[serde(default)]
    pub optional: bool,
}

/// A reference to a named, versioned [`Library`] of imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryImport {
    pub library: String,
    #[serde(default, rename = "version")]
    pub versions: VersionRange,
}

/// The closed set of requirement kinds the resolver understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementKind {
    PackageImport(PackageImport),
    RequiredBundle(RequiredBundle),
    LibraryImport(LibraryImport),
}

/// A single declared requirement with a stable identity.
///
/// Two requirements with identical clauses declared by different bundles are
/// distinct: resolutions are keyed by [`Requirement::id`], not by content.
#[derive(Debug)]
pub struct Requirement {
    id: ElementId,
    kind: RequirementKind,
}

impl Requirement {
    pub fn new(kind: RequirementKind) -> Self {
        Self {
            id: ElementId::next(),
            kind,
        }
    }

    pub fn package(package: &str, versions: VersionRange) -> Self {
        Self::new(RequirementKind::PackageImport(PackageImport {
            package: package.to_string(),
            versions,
            optional: false,
        }))
    }

    pub fn bundle(bundle: &str, versions: VersionRange) -> Self {
        Self::new(RequirementKind::RequiredBundle(RequiredBundle {
            bundle: bundle.to_string(),
            versions,
            optional: false,
        }))
    }

    pub fn library(library: &str, versions: VersionRange) -> Self {
        Self::new(RequirementKind::LibraryImport(LibraryImport {
            library: library.to_string(),
            versions,
        }))
    }

    /// Mark a package import or required bundle optional. Library imports
    /// derive their optionality and are returned unchanged.
    pub fn optional(mut self) -> Self {
        match &mut self.kind {
            RequirementKind::PackageImport(pi) => pi.optional = true,
            RequirementKind::RequiredBundle(rb) => rb.optional = true,
            RequirementKind::LibraryImport(_) => {}
        }
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> &RequirementKind {
        &self.kind
    }

    /// Whether the requirement may go unsatisfied.
    ///
    /// A library import is optional iff every package import of the library it
    /// refers to is optional. `resolve_library` looks the library up; an
    /// unknown library makes the import mandatory.
    pub fn is_optional<F>(&self, resolve_library: F) -> bool
    where
        F: FnOnce(&LibraryImport) -> Option<Arc<Library>>,
    {
        match &self.kind {
            RequirementKind::PackageImport(pi) => pi.optional,
            RequirementKind::RequiredBundle(rb) => rb.optional,
            RequirementKind::LibraryImport(li) => resolve_library(li)
                .map(|lib| lib.is_optional())
                .unwrap_or(false),
        }
    }
}

impl From<PackageImport> for Requirement {
    fn from(value: PackageImport) -> Self {
        Self::new(RequirementKind::PackageImport(value))
    }
}

impl From<RequiredBundle> for Requirement {
    fn from(value: RequiredBundle) -> Self {
        Self::new(RequirementKind::RequiredBundle(value))
    }
}

impl From<LibraryImport> for Requirement {
    fn from(value: LibraryImport) -> Self {
        Self::new(RequirementKind::LibraryImport(value))
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, name, versions, optional) = match self {
            RequirementKind::PackageImport(pi) => ("package", &pi.package, &pi.versions, pi.optional),
            RequirementKind::RequiredBundle(rb) => ("bundle", &rb.bundle, &rb.versions, rb.optional),
            RequirementKind::LibraryImport(li) => ("library", &li.library, &li.versions, false),
        };
        write!(f, "{label} {name}")?;
        if !versions.is_any() {
            write!(f, " {versions}")?;
        }
        if optional {
            write!(f, " (optional)")?;
        }
        Ok(())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
