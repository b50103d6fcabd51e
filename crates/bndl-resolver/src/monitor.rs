//! Progress and cancellation callbacks for a resolution.

use std::sync::Arc;

use bndl_core::bundle::Bundle;
use bndl_core::requirement::Requirement;

/// Observer of a resolution in progress.
///
/// Cancellation is advisory: the resolver polls [`is_cancelled`] between
/// priority tiers, between repository queries, and before descending into a
/// nested compound, then stops searching. Decisions already made are kept.
///
/// [`is_cancelled`]: ResolutionMonitor::is_cancelled
pub trait ResolutionMonitor {
    fn on_start(&self, _requirement: &Requirement) {}

    fn on_end(&self, _requirement: &Requirement, _provider: Option<&Arc<Bundle>>) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// A monitor that ignores every event and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMonitor;

impl ResolutionMonitor for NullMonitor {}

/// A monitor that reports every requirement through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMonitor;

impl ResolutionMonitor for TracingMonitor {
    fn on_start(&self, requirement: &Requirement) {
        tracing::info!(%requirement, "resolving");
    }

    fn on_end(&self, requirement: &Requirement, provider: Option<&Arc<Bundle>>) {
        match provider {
            Some(bundle) => tracing::info!(%requirement, provider = %bundle, "resolved"),
            None => tracing::info!(%requirement, "no provider"),
        }
    }
}
