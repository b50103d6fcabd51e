//! Core resolution algorithm: depth-first traversal of the model tree,
//! prioritized provider search, provider ranking, and backtracking.

use std::sync::Arc;

use bndl_core::bundle::Bundle;
use bndl_core::config::ResolveConfig;
use bndl_core::element::Element;
use bndl_core::requirement::{Requirement, RequirementKind};
use bndl_repository::{BundleRepository, RepositoryError, RepositoryManager};

use crate::context::ResolutionContext;
use crate::error::ResolveError;
use crate::monitor::ResolutionMonitor;
use crate::order;
use crate::resolution::Resolution;

/// Resolves model elements against the repositories of a [`RepositoryManager`].
///
/// The resolver holds no state between calls; every [`resolve`](Self::resolve)
/// works on its own [`Resolution`].
pub struct BundleResolver {
    manager: Arc<dyn RepositoryManager>,
}

impl BundleResolver {
    pub fn new(manager: Arc<dyn RepositoryManager>) -> Self {
        Self { manager }
    }

    /// Find a provider for every requirement reachable from `root`.
    ///
    /// Requirements are visited in declaration order. For each, priority
    /// tiers are searched in ascending order, and the candidates of a tier
    /// are tried best-first (see [`order::compare_providers`]). The first
    /// candidate whose own requirements resolve wins; a candidate already
    /// chosen for another requirement is reused as is.
    pub fn resolve(
        &self,
        root: &Element,
        config: &ResolveConfig,
        monitor: &dyn ResolutionMonitor,
    ) -> Result<Resolution, ResolveError> {
        let mut ctx = ResolutionContext::new(root, config, monitor);
        tracing::debug!(%root, ?config, "starting resolution");

        ctx.enter(root);
        self.resolve_element(root, &mut ctx)?;

        if !ctx.is_valid() {
            let err = ctx.into_error();
            tracing::debug!(error = %err, "resolution failed");
            return Err(err.into());
        }
        let resolution = ctx.into_resolution();
        tracing::debug!(
            requirements = resolution.len(),
            bundles = resolution.bundles().count(),
            "resolution complete"
        );
        Ok(resolution)
    }

    fn resolve_element(
        &self,
        element: &Element,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<(), RepositoryError> {
        if let Some(requirement) = element.as_requirement() {
            self.resolve_requirement(requirement, ctx)?;
        }
        if ctx.is_valid() {
            if let Some(children) = element.children() {
                self.resolve_compound(&children, ctx)?;
            }
        }
        Ok(())
    }

    fn resolve_compound(
        &self,
        children: &[Element],
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<(), RepositoryError> {
        for child in children {
            if !ctx.is_new(child) {
                tracing::trace!(element = %child, "skipping element already on the current path");
                continue;
            }
            match child {
                Element::Requirement(requirement) => self.resolve_requirement(requirement, ctx)?,
                compound => {
                    if !ctx.monitor.is_cancelled() {
                        ctx.enter(compound);
                        let outcome = self.resolve_element(compound, ctx);
                        ctx.exit(compound);
                        outcome?;
                    }
                }
            }
            if !ctx.is_valid() {
                break;
            }
        }
        Ok(())
    }

    fn resolve_requirement(
        &self,
        requirement: &Arc<Requirement>,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<(), RepositoryError> {
        let optional = self.is_optional(requirement);
        if optional && !ctx.config.optional {
            tracing::trace!(%requirement, "skipping optional requirement");
            return Ok(());
        }

        let mark = ctx.start_requirement(requirement);
        tracing::debug!(%requirement, depth = mark, "resolving requirement");
        let outcome = self.search_providers(requirement, mark, ctx);
        ctx.end_requirement(requirement, mark, optional);

        match ctx.resolution.provider(requirement) {
            Some(provider) => tracing::debug!(%requirement, %provider, "requirement satisfied"),
            None => tracing::debug!(%requirement, valid = ctx.is_valid(), "no provider selected"),
        }
        outcome
    }

    fn search_providers(
        &self,
        requirement: &Arc<Requirement>,
        mark: usize,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<(), RepositoryError> {
        'tiers: for level in self.manager.priority_levels() {
            if ctx.monitor.is_cancelled() {
                tracing::warn!(%requirement, "resolution cancelled");
                break;
            }

            let mut candidates = self.find_providers_at(level, requirement, ctx)?;
            if candidates.is_empty() {
                continue;
            }
            if candidates.len() > 1 {
                order::sort_candidates(requirement.kind(), &mut candidates);
            }
            tracing::trace!(
                %requirement,
                level,
                candidates = ?candidates.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
                "ranked candidates"
            );

            for candidate in &candidates {
                // A previous candidate may have failed; this one starts clean.
                ctx.set_valid(true);
                ctx.discard_trace_above(mark);

                let checkpoint = ctx.resolution.checkpoint();
                let association = ctx.resolution.add_provider(requirement, candidate);
                if !association.new_provider {
                    tracing::trace!(%requirement, provider = %candidate, "reusing chosen provider");
                    break 'tiers;
                }

                if ctx.config.dependents {
                    self.resolve_element(&Element::Bundle(candidate.clone()), ctx)?;
                }

                if ctx.is_valid() {
                    break 'tiers;
                }
                // Drop the candidate together with everything chosen on its behalf.
                tracing::trace!(%requirement, provider = %candidate, "backtracking");
                ctx.resolution.rollback_to(checkpoint);
            }
        }
        Ok(())
    }

    fn find_providers_at(
        &self,
        level: i32,
        requirement: &Requirement,
        ctx: &ResolutionContext<'_>,
    ) -> Result<Vec<Arc<Bundle>>, RepositoryError> {
        let mut providers = Vec::new();
        for repository in self.manager.repositories_at(level) {
            if ctx.monitor.is_cancelled() {
                break;
            }
            providers.extend(self.find_providers(requirement, ctx.config, repository.as_ref())?);
        }
        Ok(providers)
    }

    fn find_providers(
        &self,
        requirement: &Requirement,
        config: &ResolveConfig,
        repository: &dyn BundleRepository,
    ) -> Result<Vec<Arc<Bundle>>, RepositoryError> {
        match requirement.kind() {
            RequirementKind::PackageImport(pi) => {
                repository.find_package_providers(pi, &config.lookup)
            }
            RequirementKind::RequiredBundle(rb) => {
                repository.find_bundle_providers(rb, &config.lookup)
            }
            RequirementKind::LibraryImport(li) => match self.manager.resolve_library(li) {
                Some(library) => repository.find_library_providers(&library, &config.lookup),
                None => {
                    tracing::trace!(library = %li.library, "unknown library");
                    Ok(Vec::new())
                }
            },
        }
    }

    fn is_optional(&self, requirement: &Requirement) -> bool {
        requirement.is_optional(|li| self.manager.resolve_library(li))
    }
}
