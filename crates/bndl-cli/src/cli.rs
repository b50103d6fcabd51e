//! CLI argument definitions for bndl.
//!
//! Uses `clap` derive macros. Each command corresponds to a handler in the
//! [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bndl",
    version,
    about = "Resolve OSGi bundle requirements against prioritized repositories",
    long_about = "bndl finds a provider bundle for every package import, required bundle and \
                  library import of a project, searching repositories tier by tier and \
                  backtracking when a provider's own requirements cannot be met."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the project and print the chosen providers
    Resolve {
        #[command(flatten)]
        resolve: ResolveArgs,
        /// List each provider with the requirements it satisfies
        #[arg(long, conflicts_with = "json")]
        providers: bool,
        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the project and copy every chosen provider into its cache
    Sync {
        #[command(flatten)]
        resolve: ResolveArgs,
    },
}

/// Flags shared by every command that resolves.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to Bndl.toml (default: search current and parent directories)
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,
    /// Also search providers for optional requirements
    #[arg(long)]
    pub optional: bool,
    /// Do not resolve the requirements of chosen providers
    #[arg(long)]
    pub no_dependents: bool,
    /// Accept requirements that have no provider
    #[arg(long)]
    pub ignore_errors: bool,
    /// Only consider bundles already available locally
    #[arg(long)]
    pub local_only: bool,
}

/// Parse command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resolve_flags_parse() {
        let cli = Cli::parse_from([
            "bndl",
            "resolve",
            "--optional",
            "--no-dependents",
            "--manifest",
            "ws/Bndl.toml",
            "--providers",
        ]);
        match cli.command {
            Command::Resolve {
                resolve,
                providers,
                json,
            } => {
                assert!(resolve.optional);
                assert!(resolve.no_dependents);
                assert!(!resolve.ignore_errors);
                assert_eq!(resolve.manifest, Some(PathBuf::from("ws/Bndl.toml")));
                assert!(providers);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn providers_conflicts_with_json() {
        assert!(Cli::try_parse_from(["bndl", "resolve", "--providers", "--json"]).is_err());
    }
}
