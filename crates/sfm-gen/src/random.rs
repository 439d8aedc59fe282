//! Seeded random DAGs and complete random models.

use crate::{CongruenceFn, LinearFn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sfm_model::{Model, ModelResult, NodeId, Valuation, Value};
use std::collections::BTreeMap;

fn node_name(i: usize) -> NodeId {
    NodeId::new(format!("x{i}"))
}

/// Sample an Erdős–Rényi-style DAG over nodes `x0..x{n-1}`.
///
/// An edge `xi -> xj` is drawn with probability `p` only for `i < j`, so
/// the index order is a witness topological order and the result is
/// acyclic by construction.
pub fn random_dag(n: usize, p: f64, rng: &mut impl Rng) -> Vec<(NodeId, NodeId)> {
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(p.clamp(0.0, 1.0)) {
                edges.push((node_name(i), node_name(j)));
            }
        }
    }
    edges
}

fn parent_map(n: usize, edges: &[(NodeId, NodeId)]) -> BTreeMap<NodeId, Vec<NodeId>> {
    let mut parents: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for i in 0..n {
        parents.insert(node_name(i), Vec::new());
    }
    for (from, to) in edges {
        if let Some(list) = parents.get_mut(to) {
            list.push(from.clone());
        }
    }
    parents
}

/// A seeded random model with [`LinearFn`] structural functions.
pub fn random_linear_model(n: usize, p: f64, seed: u64) -> ModelResult<Model> {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges = random_dag(n, p, &mut rng);
    let parents = parent_map(n, &edges);

    let mut builder = Model::builder();
    for node in parents.keys() {
        builder = builder.node(node.clone());
    }
    for (from, to) in &edges {
        builder = builder.edge(from.clone(), to.clone());
    }
    for (node, parent_list) in &parents {
        if !parent_list.is_empty() {
            builder = builder.function(
                node.clone(),
                LinearFn::random(parent_list.clone(), &mut rng),
            );
        }
    }
    builder.build()
}

/// A seeded random model with [`CongruenceFn`] structural functions
/// modulo `m`.
pub fn random_congruence_model(n: usize, p: f64, m: i64, seed: u64) -> ModelResult<Model> {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges = random_dag(n, p, &mut rng);
    let parents = parent_map(n, &edges);

    let mut builder = Model::builder();
    for node in parents.keys() {
        builder = builder.node(node.clone());
    }
    for (from, to) in &edges {
        builder = builder.edge(from.clone(), to.clone());
    }
    for (node, parent_list) in &parents {
        if !parent_list.is_empty() {
            builder = builder.function(
                node.clone(),
                CongruenceFn::random(parent_list.clone(), m, &mut rng),
            );
        }
    }
    builder.build()
}

/// A root valuation of uniform integers in `0..m`.
pub fn random_int_roots(model: &Model, m: i64, rng: &mut impl Rng) -> Valuation {
    model
        .roots()
        .iter()
        .map(|node| (node.clone(), Value::Int(rng.gen_range(0..m.max(1)))))
        .collect()
}

/// A root valuation of uniform floats in [-1, 1).
pub fn random_number_roots(model: &Model, rng: &mut impl Rng) -> Valuation {
    model
        .roots()
        .iter()
        .map(|node| (node.clone(), Value::Number(rng.gen_range(-1.0..1.0))))
        .collect()
}
