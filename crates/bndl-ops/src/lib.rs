pub mod ops_resolve;
pub mod ops_sync;

use std::path::{Path, PathBuf};

use bndl_core::MANIFEST_FILE;
use bndl_util::errors::BndlError;
use bndl_util::fs::find_ancestor_with;

/// Locate the workspace description.
///
/// An explicit path is taken relative to `cwd`; otherwise `Bndl.toml` is
/// searched for in `cwd` and its ancestors.
pub fn locate_manifest(cwd: &Path, explicit: Option<&Path>) -> miette::Result<PathBuf> {
    if let Some(path) = explicit {
        let path = cwd.join(path);
        if !path.is_file() {
            return Err(BndlError::Manifest {
                message: format!("{} does not exist", path.display()),
            }
            .into());
        }
        return Ok(path);
    }

    let root = find_ancestor_with(cwd, MANIFEST_FILE).ok_or_else(|| BndlError::Manifest {
        message: format!("Could not find {MANIFEST_FILE} in current or parent directories"),
    })?;
    Ok(root.join(MANIFEST_FILE))
}
