//! Shared precondition checks.
//!
//! Every inference entry point validates its inputs up front and returns
//! an error before any traversal; a violated precondition never yields a
//! partial result.

use crate::error::{InferError, InferResult};
use sfm_model::{Model, NodeId, Valuation};
use std::collections::BTreeSet;

/// The cached topological order, or `CyclicModel`.
pub(crate) fn require_order(model: &Model) -> InferResult<&[NodeId]> {
    model.topological_order().ok_or(InferError::CyclicModel)
}

/// Reject cyclic models without demanding the order (backward traversal
/// does not need one).
pub(crate) fn require_acyclic(model: &Model) -> InferResult<()> {
    if model.is_acyclic() {
        Ok(())
    } else {
        Err(InferError::CyclicModel)
    }
}

fn coverage_diff(
    required: &BTreeSet<NodeId>,
    supplied: &Valuation,
) -> Option<(Vec<NodeId>, Vec<NodeId>)> {
    let missing: Vec<NodeId> = required
        .iter()
        .filter(|n| !supplied.contains(n))
        .cloned()
        .collect();
    let extra: Vec<NodeId> = supplied
        .nodes()
        .filter(|n| !required.contains(*n))
        .cloned()
        .collect();
    if missing.is_empty() && extra.is_empty() {
        None
    } else {
        Some((missing, extra))
    }
}

/// The exogenous valuation must cover exactly the root set.
pub(crate) fn check_root_coverage(model: &Model, exo: &Valuation) -> InferResult<()> {
    match coverage_diff(model.roots(), exo) {
        None => Ok(()),
        Some((missing, extra)) => Err(InferError::InputCoverage { missing, extra }),
    }
}

/// The baseline must cover exactly the whole node set.
pub(crate) fn check_baseline_total(model: &Model, baseline: &Valuation) -> InferResult<()> {
    let all: BTreeSet<NodeId> = model.nodes().cloned().collect();
    match coverage_diff(&all, baseline) {
        None => Ok(()),
        Some((missing, extra)) => Err(InferError::BaselineCoverage { missing, extra }),
    }
}

/// Every changed node must be a root.
pub(crate) fn check_changed_roots(model: &Model, changed: &Valuation) -> InferResult<()> {
    for node in changed.nodes() {
        if !model.roots().contains(node) {
            return Err(InferError::NonRootChange(node.clone()));
        }
    }
    Ok(())
}

/// Every target must exist in the model.
pub(crate) fn check_targets(model: &Model, targets: &BTreeSet<NodeId>) -> InferResult<()> {
    for node in targets {
        if !model.contains(node) {
            return Err(InferError::UnknownTarget(node.clone()));
        }
    }
    Ok(())
}
