//! Command dispatch and handler modules.

mod resolve;
mod sync;

use miette::Result;

use bndl_ops::ops_resolve::ResolveOptions;

use crate::cli::{Cli, Command, ResolveArgs};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Resolve {
            resolve,
            providers,
            json,
        } => resolve::exec(resolve.into(), providers, json),
        Command::Sync { resolve } => sync::exec(resolve.into()),
    }
}

impl From<ResolveArgs> for ResolveOptions {
    fn from(args: ResolveArgs) -> Self {
        Self {
            manifest: args.manifest,
            optional: args.optional,
            no_dependents: args.no_dependents,
            ignore_errors: args.ignore_errors,
            local_only: args.local_only,
        }
    }
}
