//! Goal-directed (partial) inference.
//!
//! Computes only a requested subset of target nodes, visiting only their
//! ancestor closure. Useful when the graph is large and the targets few:
//! no global topological sort is ever materialized. The traversal is an
//! explicit stack-based simulation of recursive dependency resolution —
//! pop a node; if any parent is unresolved, push the node back followed
//! by its unresolved parents; otherwise resolve it. The resolved map
//! doubles as memoization, so each node is computed at most once.

use crate::checks::{
    check_baseline_total, check_changed_roots, check_root_coverage, check_targets,
    require_acyclic,
};
use crate::error::InferResult;
use crate::report::{InferStats, Inferred};
use sfm_model::{Model, ModelError, NodeId, Valuation, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Goal-directed forward inference from a complete root valuation.
///
/// Returns the valuation restricted to `targets`. Never evaluates a node
/// outside the targets' ancestor closure; cost is bounded by the size of
/// that closure, not the whole graph.
pub fn infer_partial(
    model: &Model,
    exo: &Valuation,
    targets: &BTreeSet<NodeId>,
) -> InferResult<Inferred> {
    require_acyclic(model)?;
    check_root_coverage(model, exo)?;
    check_targets(model, targets)?;

    let mut w = exo.clone();
    let mut stats = InferStats::default();
    let mut stack: Vec<NodeId> = targets.iter().cloned().collect();

    while let Some(node) = stack.pop() {
        if w.contains(&node) {
            continue;
        }
        // Roots are all present in `w` already, so this node is derived.
        let parents = model
            .parents(&node)
            .ok_or_else(|| ModelError::UnknownNode(node.clone()))?;
        let unknown: Vec<NodeId> = parents.iter().filter(|p| !w.contains(p)).cloned().collect();
        if !unknown.is_empty() {
            // Revisit this node once all parents have resolved.
            stack.push(node);
            stack.extend(unknown);
            continue;
        }
        let f = model
            .function(&node)
            .ok_or_else(|| ModelError::MissingFunction(node.clone()))?;
        let value = f.eval(&w);
        stats.evaluations += 1;
        w.insert(node, value);
    }

    Ok(Inferred {
        valuation: w.restrict(targets),
        stats,
    })
}

/// Per-node resolution state for the delta variant: the node's current
/// value plus whether it still differs from baseline.
struct Resolved {
    value: Value,
    dirty: bool,
}

/// Goal-directed contrastive inference.
///
/// Combines change propagation with ancestor-closure restriction: only
/// nodes that are both needed for a target and possibly dirty are ever
/// evaluated. Classification is resolved lazily per visited node — roots
/// from `changed` membership, derived nodes once all parents resolve —
/// with the same demotion rule as [`crate::infer_delta`]: a recomputed
/// value equal to baseline marks the node clean for its dependents.
pub fn infer_partial_delta(
    model: &Model,
    baseline: &Valuation,
    changed: &Valuation,
    targets: &BTreeSet<NodeId>,
) -> InferResult<Inferred> {
    require_acyclic(model)?;
    check_baseline_total(model, baseline)?;
    check_changed_roots(model, changed)?;
    check_targets(model, targets)?;

    let mut resolved: BTreeMap<NodeId, Resolved> = BTreeMap::new();
    let mut stats = InferStats::default();
    let mut stack: Vec<NodeId> = targets.iter().cloned().collect();

    while let Some(node) = stack.pop() {
        if resolved.contains_key(&node) {
            continue;
        }
        if model.roots().contains(&node) {
            let baseline_value = baseline
                .get(&node)
                .ok_or_else(|| ModelError::Uncovered(node.clone()))?;
            let (value, dirty) = match changed.get(&node) {
                Some(new_value) if new_value != baseline_value => (new_value.clone(), true),
                _ => (baseline_value.clone(), false),
            };
            if !dirty {
                stats.reused += 1;
            }
            resolved.insert(node, Resolved { value, dirty });
            continue;
        }

        let parents = model
            .parents(&node)
            .ok_or_else(|| ModelError::UnknownNode(node.clone()))?;
        let unresolved: Vec<NodeId> = parents
            .iter()
            .filter(|p| !resolved.contains_key(*p))
            .cloned()
            .collect();
        if !unresolved.is_empty() {
            stack.push(node);
            stack.extend(unresolved);
            continue;
        }

        let any_dirty = parents
            .iter()
            .any(|p| resolved.get(p).is_some_and(|r| r.dirty));
        if !any_dirty {
            // No dirty parent: inherit baseline, no evaluation.
            let value = baseline
                .get(&node)
                .ok_or_else(|| ModelError::Uncovered(node.clone()))?
                .clone();
            stats.reused += 1;
            resolved.insert(node, Resolved { value, dirty: false });
            continue;
        }

        // Mixed parent valuation: new values for dirty parents, baseline
        // for clean ones — both already sit in the resolved map.
        let mut w_parents = Valuation::new();
        for parent in parents {
            let r = resolved
                .get(parent)
                .ok_or_else(|| ModelError::Uncovered(parent.clone()))?;
            w_parents.insert(parent.clone(), r.value.clone());
        }
        let f = model
            .function(&node)
            .ok_or_else(|| ModelError::MissingFunction(node.clone()))?;
        let value = f.eval(&w_parents);
        stats.evaluations += 1;
        let unchanged = baseline.get(&node) == Some(&value);
        if unchanged {
            stats.demoted += 1;
        }
        resolved.insert(
            node,
            Resolved {
                value,
                dirty: !unchanged,
            },
        );
    }

    let valuation = targets
        .iter()
        .filter_map(|t| resolved.get(t).map(|r| (t.clone(), r.value.clone())))
        .collect();
    Ok(Inferred {
        valuation,
        stats,
    })
}
