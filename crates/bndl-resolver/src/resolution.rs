//! The result of a resolution: which bundle provides each requirement, and
//! which requirements each bundle provides.

use std::collections::HashMap;
use std::sync::Arc;

use bndl_core::bundle::Bundle;
use bndl_core::element::ElementId;
use bndl_core::requirement::Requirement;
use bndl_util::progress::ProgressSink;

struct Provided {
    bundle: Arc<Bundle>,
    requirements: Vec<Arc<Requirement>>,
}

/// Outcome of [`Resolution::add_provider`].
#[derive(Debug, Clone)]
pub struct Association {
    /// The provider had no requirements before this insertion.
    pub new_provider: bool,
    /// The provider the requirement was moved away from, if any.
    pub replaced: Option<Arc<Bundle>>,
}

/// One [`Resolution::add_provider`] that changed the map.
struct JournalEntry {
    requirement: Arc<Requirement>,
    replaced: Option<Arc<Bundle>>,
}

/// Bidirectional requirement/provider map.
///
/// Invariants: a requirement appears in exactly one provider's requirement
/// list iff it maps to that provider, and no provider is kept with an empty
/// requirement list. Iteration follows first-association order.
///
/// Every association is journaled, so all changes made after a
/// [`checkpoint`](Self::checkpoint) can be undone with
/// [`rollback_to`](Self::rollback_to).
pub struct Resolution {
    providers: HashMap<ElementId, (Arc<Requirement>, Arc<Bundle>)>,
    providees: HashMap<ElementId, Provided>,
    requirement_order: Vec<ElementId>,
    bundle_order: Vec<ElementId>,
    journal: Vec<JournalEntry>,
    success: bool,
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolution {
    /// An empty resolution, initially successful.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            providees: HashMap::new(),
            requirement_order: Vec::new(),
            bundle_order: Vec::new(),
            journal: Vec::new(),
            success: true,
        }
    }

    /// Associate `requirement` with `provider`.
    ///
    /// Re-adding an existing association changes nothing and reports the
    /// provider as already known. A requirement mapped to another provider is
    /// moved, and the old provider is returned in [`Association::replaced`].
    pub fn add_provider(
        &mut self,
        requirement: &Arc<Requirement>,
        provider: &Arc<Bundle>,
    ) -> Association {
        let current = self
            .providers
            .get(&requirement.id())
            .map(|(_, bundle)| bundle.id());
        let replaced = match current {
            Some(id) if id == provider.id() => {
                return Association {
                    new_provider: false,
                    replaced: None,
                };
            }
            Some(_) => self.remove_provider(requirement),
            None => None,
        };

        self.journal.push(JournalEntry {
            requirement: requirement.clone(),
            replaced: replaced.clone(),
        });
        let new_provider = self.insert(requirement, provider);
        Association {
            new_provider,
            replaced,
        }
    }

    /// Map `requirement` to `provider`; true if the provider was not chosen before.
    fn insert(&mut self, requirement: &Arc<Requirement>, provider: &Arc<Bundle>) -> bool {
        self.providers
            .insert(requirement.id(), (requirement.clone(), provider.clone()));
        self.requirement_order.push(requirement.id());

        let new_provider = !self.providees.contains_key(&provider.id());
        if new_provider {
            self.bundle_order.push(provider.id());
        }
        self.providees
            .entry(provider.id())
            .or_insert_with(|| Provided {
                bundle: provider.clone(),
                requirements: Vec::new(),
            })
            .requirements
            .push(requirement.clone());
        new_provider
    }

    /// Remove the association of `requirement`, returning its provider.
    /// Removing an unmapped requirement is a no-op.
    pub fn remove_provider(&mut self, requirement: &Requirement) -> Option<Arc<Bundle>> {
        let id = requirement.id();
        let (_, provider) = self.providers.remove(&id)?;
        self.requirement_order.retain(|r| *r != id);

        if let Some(provided) = self.providees.get_mut(&provider.id()) {
            provided.requirements.retain(|r| r.id() != id);
            if provided.requirements.is_empty() {
                self.providees.remove(&provider.id());
                self.bundle_order.retain(|b| *b != provider.id());
            }
        }
        Some(provider)
    }

    /// Position in the association journal to roll back to later.
    pub fn checkpoint(&self) -> usize {
        self.journal.len()
    }

    /// Undo every association made since `checkpoint`, newest first,
    /// restoring the providers they replaced.
    pub fn rollback_to(&mut self, checkpoint: usize) {
        if checkpoint >= self.journal.len() {
            return;
        }
        let undone = self.journal.split_off(checkpoint);
        for entry in undone.into_iter().rev() {
            self.remove_provider(&entry.requirement);
            if let Some(previous) = entry.replaced {
                self.insert(&entry.requirement, &previous);
            }
        }
    }

    /// Forget the journal; associations made so far can no longer be undone.
    pub(crate) fn commit(&mut self) {
        self.journal.clear();
    }

    pub fn provider(&self, requirement: &Requirement) -> Option<&Arc<Bundle>> {
        self.providers.get(&requirement.id()).map(|(_, b)| b)
    }

    /// Requirements satisfied by `bundle`; empty if it was not chosen.
    pub fn provided_requirements(&self, bundle: &Bundle) -> &[Arc<Requirement>] {
        self.providees
            .get(&bundle.id())
            .map(|p| p.requirements.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_bundle(&self, bundle: &Bundle) -> bool {
        self.providees.contains_key(&bundle.id())
    }

    /// Every chosen provider.
    pub fn bundles(&self) -> impl Iterator<Item = &Arc<Bundle>> {
        self.bundle_order
            .iter()
            .filter_map(|id| self.providees.get(id))
            .map(|p| &p.bundle)
    }

    /// Every satisfied requirement with its provider.
    pub fn requirements(&self) -> impl Iterator<Item = (&Arc<Requirement>, &Arc<Bundle>)> {
        self.requirement_order
            .iter()
            .filter_map(|id| self.providers.get(id))
            .map(|(r, b)| (r, b))
    }

    /// Number of satisfied requirements.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub(crate) fn set_success(&mut self, success: bool) {
        self.success = success;
    }

    /// Whether every chosen provider is available locally.
    pub fn is_synchronized(&self) -> bool {
        self.bundles().all(|b| b.is_synchronized())
    }

    /// Make every chosen provider available locally, one after the other.
    ///
    /// A failing bundle is logged and recorded in the report; the remaining
    /// bundles are still synchronized. Cancellation is checked before each
    /// bundle.
    pub fn synchronize(&self, progress: &dyn ProgressSink) -> SyncReport {
        let bundles: Vec<&Arc<Bundle>> = self.bundles().collect();
        progress.begin(bundles.len() as u64);

        let mut report = SyncReport::default();
        for bundle in bundles {
            if progress.is_cancelled() {
                tracing::warn!("synchronization cancelled");
                report.cancelled = true;
                break;
            }
            match bundle.synchronize() {
                Ok(()) => report.synchronized.push(bundle.clone()),
                Err(e) => {
                    tracing::error!(bundle = %bundle, error = %e, "failed to synchronize");
                    report.failed.push((bundle.clone(), e.to_string()));
                }
            }
            progress.advance(1);
        }
        report
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("requirements", &self.providers.len())
            .field("bundles", &self.providees.len())
            .field("success", &self.success)
            .finish()
    }
}

/// What [`Resolution::synchronize`] managed to do.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub synchronized: Vec<Arc<Bundle>>,
    pub failed: Vec<(Arc<Bundle>, String)>,
    pub cancelled: bool,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.failed.is_empty()
    }
}
