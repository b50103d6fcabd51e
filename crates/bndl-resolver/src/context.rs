use std::collections::HashSet;
use std::sync::Arc;

use bndl_core::bundle::Bundle;
use bndl_core::config::ResolveConfig;
use bndl_core::element::{Element, ElementId};
use bndl_core::requirement::Requirement;

use crate::error::ResolutionError;
use crate::monitor::ResolutionMonitor;
use crate::resolution::Resolution;

/// Mutable state of one `resolve` call.
pub(crate) struct ResolutionContext<'a> {
    pub root: &'a Element,
    pub config: &'a ResolveConfig,
    pub monitor: &'a dyn ResolutionMonitor,
    pub resolution: Resolution,
    /// Compounds on the current recursion path.
    entered: HashSet<ElementId>,
    /// Requirements started but not (yet) satisfied.
    trace: Vec<Arc<Requirement>>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(
        root: &'a Element,
        config: &'a ResolveConfig,
        monitor: &'a dyn ResolutionMonitor,
    ) -> Self {
        Self {
            root,
            config,
            monitor,
            resolution: Resolution::new(),
            entered: HashSet::new(),
            trace: Vec::new(),
        }
    }

    pub fn enter(&mut self, element: &Element) {
        self.entered.insert(element.id());
    }

    pub fn exit(&mut self, element: &Element) {
        self.entered.remove(&element.id());
    }

    pub fn is_new(&self, element: &Element) -> bool {
        !self.entered.contains(&element.id())
    }

    pub fn is_valid(&self) -> bool {
        self.resolution.is_success()
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.resolution.set_success(valid);
    }

    /// Push `requirement` onto the trace and return its position.
    pub fn start_requirement(&mut self, requirement: &Arc<Requirement>) -> usize {
        let mark = self.trace.len();
        self.trace.push(requirement.clone());
        self.monitor.on_start(requirement);
        mark
    }

    /// Drop breadcrumbs left above `mark` by an abandoned candidate.
    pub fn discard_trace_above(&mut self, mark: usize) {
        self.trace.truncate(mark + 1);
    }

    /// Decide whether `requirement` is satisfied and report the outcome.
    ///
    /// A satisfied requirement leaves the trace together with anything above
    /// it; an unsatisfied one stays as a diagnostic breadcrumb.
    pub fn end_requirement(&mut self, requirement: &Requirement, mark: usize, optional: bool) {
        let provider: Option<Arc<Bundle>> = self.resolution.provider(requirement).cloned();
        let valid = provider.is_some() || optional || self.config.ignore_errors;
        self.set_valid(valid);
        if valid {
            self.trace.truncate(mark);
        }
        self.monitor.on_end(requirement, provider.as_ref());
    }

    pub fn into_error(self) -> ResolutionError {
        ResolutionError::new(self.root.clone(), self.trace)
    }

    pub fn into_resolution(self) -> Resolution {
        let mut resolution = self.resolution;
        resolution.commit();
        resolution
    }
}
