use serde::{Deserialize, Serialize};

use crate::requirement::{PackageImport, RequiredBundle};
use crate::version::Version;

/// A named, versioned group of imports that bundles can pull in as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    pub version: Version,
    #[serde(default)]
    pub imports: Vec<PackageImport>,
    #[serde(default)]
    pub requires: Vec<RequiredBundle>,
}

impl Library {
    /// A library is optional when all of its package imports are.
    pub fn is_optional(&self) -> bool {
        self.imports.iter().all(|pi| pi.optional)
    }
}
