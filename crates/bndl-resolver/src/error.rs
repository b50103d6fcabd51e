use std::sync::Arc;

use bndl_core::element::Element;
use bndl_core::requirement::Requirement;
use bndl_repository::RepositoryError;
use miette::Diagnostic;
use thiserror::Error;

/// No provider could be found for a mandatory requirement.
///
/// The trace runs from the outermost unresolved requirement down to the one
/// that had no viable provider.
#[derive(Debug, Error, Diagnostic)]
#[error("unable to resolve {root}: {}", describe(.trace))]
#[diagnostic(help(
    "add a repository that provides the missing requirement, mark it optional, or resolve with --ignore-errors"
))]
pub struct ResolutionError {
    root: Element,
    trace: Vec<Arc<Requirement>>,
}

impl ResolutionError {
    pub fn new(root: Element, trace: Vec<Arc<Requirement>>) -> Self {
        Self { root, trace }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn trace(&self) -> &[Arc<Requirement>] {
        &self.trace
    }

    /// The innermost requirement that could not be satisfied.
    pub fn unsatisfied(&self) -> Option<&Arc<Requirement>> {
        self.trace.last()
    }
}

fn describe(trace: &[Arc<Requirement>]) -> String {
    match trace.split_last() {
        None => "resolution was not successful".to_string(),
        Some((last, [])) => format!("no provider for {last}"),
        Some((last, via)) => {
            let chain: Vec<String> = via.iter().map(ToString::to_string).collect();
            format!("no provider for {last} (required via {})", chain.join(" -> "))
        }
    }
}

/// Errors returned by [`BundleResolver::resolve`](crate::BundleResolver::resolve).
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Unresolved(#[from] ResolutionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use bndl_core::version::VersionRange;

    #[test]
    fn message_lists_requirement_chain() {
        let root = Element::from(Requirement::bundle("com.acme.app", VersionRange::any()));
        let trace = vec![
            Arc::new(Requirement::package("com.acme.api", VersionRange::any())),
            Arc::new(Requirement::package("org.slf4j", VersionRange::any())),
        ];
        let err = ResolutionError::new(root, trace);
        assert_eq!(
            err.to_string(),
            "unable to resolve bundle com.acme.app: no provider for package org.slf4j \
             (required via package com.acme.api)"
        );
        assert_eq!(err.unsatisfied().unwrap().to_string(), "package org.slf4j");
    }

    #[test]
    fn single_entry_trace() {
        let root = Element::from(Requirement::package("a", VersionRange::any()));
        let trace = vec![Arc::new(Requirement::package("a", VersionRange::any()))];
        let err = ResolutionError::new(root, trace);
        assert!(err.to_string().ends_with("no provider for package a"));
    }
}
