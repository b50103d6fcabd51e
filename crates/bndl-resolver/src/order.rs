//! Ranking of competing providers for a single requirement.

use std::cmp::Ordering;
use std::sync::Arc;

use bndl_core::bundle::Bundle;
use bndl_core::requirement::RequirementKind;
use bndl_core::version::Version;

/// Compare two candidate providers for `requirement`; `Less` means `a` is tried first.
///
/// 1. Higher version first: the version of the matching package export for a
///    package import, the bundle version for a required bundle. A candidate
///    with a version sorts before one without.
/// 2. Fewer package imports first.
pub fn compare_providers(requirement: &RequirementKind, a: &Bundle, b: &Bundle) -> Ordering {
    compare_versions(requirement, a, b).then_with(|| a.import_count().cmp(&b.import_count()))
}

/// Sort candidates best-first. The sort is stable, so equally ranked
/// candidates keep their discovery order.
pub fn sort_candidates(requirement: &RequirementKind, candidates: &mut [Arc<Bundle>]) {
    candidates.sort_by(|a, b| compare_providers(requirement, a, b));
}

fn compare_versions(requirement: &RequirementKind, a: &Bundle, b: &Bundle) -> Ordering {
    match (
        ranking_version(requirement, a),
        ranking_version(requirement, b),
    ) {
        (Some(va), Some(vb)) => vb.cmp(va),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn ranking_version<'a>(requirement: &RequirementKind, bundle: &'a Bundle) -> Option<&'a Version> {
    match requirement {
        RequirementKind::PackageImport(pi) => bundle.export_version(&pi.package, &pi.versions),
        RequirementKind::RequiredBundle(_) => Some(bundle.version()),
        RequirementKind::LibraryImport(_) => None,
    }
}
