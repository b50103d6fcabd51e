//! Operation: resolve the project's bundles against its repositories.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use serde::Serialize;

use bndl_core::bundle::Bundle;
use bndl_core::config::ResolveConfig;
use bndl_core::manifest::Workspace;
use bndl_core::requirement::Requirement;
use bndl_repository::RepositoryRegistry;
use bndl_resolver::{
    BundleResolver, Resolution, ResolutionMonitor, ResolveError, TracingMonitor,
};
use bndl_util::errors::BndlError;
use bndl_util::progress;

/// Options shared by `bndl resolve` and `bndl sync`.
///
/// Flags only ever switch behavior on (or, for `no_dependents`, off) relative
/// to the `[resolve]` table of `Bndl.toml`.
#[derive(Debug, Default, Clone)]
pub struct ResolveOptions {
    /// Explicit path to the workspace description.
    pub manifest: Option<PathBuf>,
    pub optional: bool,
    pub no_dependents: bool,
    pub ignore_errors: bool,
    pub local_only: bool,
}

impl ResolveOptions {
    /// Overlay the command-line flags on a configuration loaded from disk.
    pub fn apply(&self, config: ResolveConfig) -> ResolveConfig {
        let optional = config.optional || self.optional;
        let dependents = config.dependents && !self.no_dependents;
        let ignore_errors = config.ignore_errors || self.ignore_errors;
        let local_only = config.lookup.local_only || self.local_only;
        config
            .with_optional(optional)
            .with_dependents(dependents)
            .with_ignore_errors(ignore_errors)
            .with_local_only(local_only)
    }
}

/// How `bndl resolve` prints its result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `requirement -> provider` line per satisfied requirement.
    #[default]
    Requirements,
    /// Each chosen provider followed by the requirements it satisfies.
    Providers,
    Json,
}

/// A loaded workspace together with its resolution.
pub struct Resolved {
    pub workspace: Workspace,
    pub base_dir: PathBuf,
    pub resolution: Resolution,
}

/// Load the workspace found from `cwd` and resolve its project bundles.
pub fn resolve_workspace(cwd: &Path, opts: &ResolveOptions) -> miette::Result<Resolved> {
    let manifest_path = crate::locate_manifest(cwd, opts.manifest.as_deref())?;
    let base_dir = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());
    let workspace = Workspace::from_path(&manifest_path)?;
    let config = opts.apply(workspace.resolve.clone());

    let registry = RepositoryRegistry::from_workspace(&workspace, &base_dir);
    tracing::debug!(
        manifest = %manifest_path.display(),
        repositories = registry.repository_count(),
        "loaded workspace"
    );

    let root = workspace.root_element();
    let resolver = BundleResolver::new(Arc::new(registry));
    // Spinners are hidden off a terminal, so log progress there instead.
    let outcome = if console::Term::stderr().is_term() {
        let monitor = SpinnerMonitor::new(&format!("Resolving {}", workspace.project.name));
        let outcome = resolver.resolve(&root, &config, &monitor);
        monitor.finish();
        outcome
    } else {
        resolver.resolve(&root, &config, &TracingMonitor)
    };

    let resolution = outcome.map_err(into_bndl_error)?;
    Ok(Resolved {
        workspace,
        base_dir,
        resolution,
    })
}

/// Resolve the workspace and print the outcome in `format`.
pub fn resolve(cwd: &Path, opts: &ResolveOptions, format: OutputFormat) -> miette::Result<()> {
    let resolved = resolve_workspace(cwd, opts)?;
    let resolution = &resolved.resolution;

    if format == OutputFormat::Json {
        let report = ResolutionReport::new(&resolved.workspace.project.name, resolution);
        let json = serde_json::to_string_pretty(&report).map_err(|e| BndlError::Generic {
            message: format!("Failed to serialize resolution: {e}"),
        })?;
        println!("{json}");
        return Ok(());
    }

    progress::status(
        "Resolved",
        &format!(
            "{} requirement(s) with {} bundle(s)",
            resolution.len(),
            resolution.bundles().count()
        ),
    );
    if resolution.is_empty() {
        println!("No requirements to resolve.");
        return Ok(());
    }

    match format {
        OutputFormat::Providers => {
            for bundle in resolution.bundles() {
                println!("{bundle}");
                for requirement in resolution.provided_requirements(bundle) {
                    println!("  {requirement}");
                }
            }
        }
        _ => {
            for (requirement, provider) in resolution.requirements() {
                println!("{requirement} -> {provider}");
            }
        }
    }
    Ok(())
}

fn into_bndl_error(err: ResolveError) -> BndlError {
    match err {
        ResolveError::Unresolved(err) => BndlError::Resolution {
            message: err.to_string(),
        },
        ResolveError::Repository(err) => BndlError::Repository {
            message: err.to_string(),
        },
    }
}

/// Shows the requirement being resolved on a terminal spinner.
pub struct SpinnerMonitor {
    spinner: ProgressBar,
}

impl SpinnerMonitor {
    pub fn new(message: &str) -> Self {
        Self {
            spinner: progress::spinner(message),
        }
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ResolutionMonitor for SpinnerMonitor {
    fn on_start(&self, requirement: &Requirement) {
        self.spinner.set_message(format!("Resolving {requirement}"));
    }

    fn on_end(&self, requirement: &Requirement, provider: Option<&Arc<Bundle>>) {
        if let Some(provider) = provider {
            tracing::debug!(%requirement, %provider, "resolved");
        }
    }
}

/// Machine-readable form of a resolution, printed by `bndl resolve --json`.
#[derive(Debug, Serialize)]
pub struct ResolutionReport {
    pub project: String,
    pub success: bool,
    pub requirements: Vec<RequirementReport>,
    pub bundles: Vec<BundleReport>,
}

#[derive(Debug, Serialize)]
pub struct RequirementReport {
    pub requirement: String,
    pub provider: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct BundleReport {
    pub name: String,
    pub version: String,
    pub synchronized: bool,
    pub provides: Vec<String>,
}

impl ResolutionReport {
    pub fn new(project: &str, resolution: &Resolution) -> Self {
        let requirements = resolution
            .requirements()
            .map(|(requirement, provider)| RequirementReport {
                requirement: requirement.to_string(),
                provider: provider.name().to_string(),
                version: provider.version().to_string(),
            })
            .collect();
        let bundles = resolution
            .bundles()
            .map(|bundle| BundleReport {
                name: bundle.name().to_string(),
                version: bundle.version().to_string(),
                synchronized: bundle.is_synchronized(),
                provides: resolution
                    .provided_requirements(bundle)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect();
        Self {
            project: project.to_string(),
            success: resolution.is_success(),
            requirements,
            bundles,
        }
    }
}
