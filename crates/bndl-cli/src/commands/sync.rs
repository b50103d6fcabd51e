//! Handler for `bndl sync`.

use miette::Result;

use bndl_ops::ops_resolve::ResolveOptions;
use bndl_ops::ops_sync;
use bndl_util::errors::BndlError;

pub fn exec(opts: ResolveOptions) -> Result<()> {
    let cwd = std::env::current_dir().map_err(BndlError::Io)?;
    let report = ops_sync::sync(&cwd, &opts)?;
    if !report.is_complete() {
        tracing::warn!(
            failed = report.failed.len(),
            cancelled = report.cancelled,
            "synchronization incomplete"
        );
    }
    Ok(())
}
