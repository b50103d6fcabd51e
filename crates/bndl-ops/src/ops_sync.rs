//! Operation: resolve, then copy every chosen provider's archive into its cache.

use std::path::Path;

use bndl_resolver::SyncReport;
use bndl_util::progress;

use crate::ops_resolve::{self, ResolveOptions};

/// Resolve the workspace and synchronize the chosen providers.
///
/// Only a failed resolution is an error. Bundles that cannot be synchronized
/// are reported and listed in the returned [`SyncReport`].
pub fn sync(cwd: &Path, opts: &ResolveOptions) -> miette::Result<SyncReport> {
    let resolved = ops_resolve::resolve_workspace(cwd, opts)?;
    let resolution = &resolved.resolution;
    let total = resolution.bundles().count() as u64;

    if resolution.is_synchronized() {
        progress::status_info("Fresh", &format!("{total} bundle(s) already available locally"));
    }

    let pb = progress::progress_bar(total, "Synchronizing");
    let report = resolution.synchronize(&pb);
    pb.finish_and_clear();

    for (bundle, message) in &report.failed {
        progress::status_warn("Failed", &format!("{bundle}: {message}"));
    }
    if report.cancelled {
        progress::status_warn("Cancelled", "synchronization stopped before completion");
    }
    progress::status(
        "Synchronized",
        &format!("{} of {total} bundle(s)", report.synchronized.len()),
    );
    Ok(report)
}
