//! Handler for `bndl resolve`.

use miette::Result;

use bndl_ops::ops_resolve::{self, OutputFormat, ResolveOptions};
use bndl_util::errors::BndlError;

pub fn exec(opts: ResolveOptions, providers: bool, json: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(BndlError::Io)?;

    let format = if json {
        OutputFormat::Json
    } else if providers {
        OutputFormat::Providers
    } else {
        OutputFormat::Requirements
    };

    ops_resolve::resolve(&cwd, &opts, format)
}
