//! The immutable structural function model.
//!
//! A model is a triple of (DAG structure, per-node domain metadata,
//! per-node structural function), frozen at build time. Inference never
//! mutates a model; composing or re-learning a model always constructs a
//! new one. The builder validates the function/structure pairing and
//! precomputes the read-only views (root and derived sets, parent sets,
//! topological order) that the evaluators consume.

use crate::error::{ModelError, ModelResult};
use crate::{Domain, NodeId, Valuation, Value};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A structural function: a pure, deterministic, total mapping from a
/// valuation of the node's parents to the node's value.
///
/// The argument may be any superset valuation containing all parent keys;
/// implementations look up only their own parents. The engine never
/// inspects a function's internals, only this contract.
pub trait StructuralFn: Send + Sync {
    /// Compute this node's value from its parents' values.
    fn eval(&self, w: &Valuation) -> Value;
}

// Closure adapter for `ModelBuilder::function_fn`. A blanket impl over
// `Fn` would forbid downstream crates from implementing the trait for
// their own types, so closures get wrapped instead.
struct FnAdapter<F>(F);

impl<F> StructuralFn for FnAdapter<F>
where
    F: Fn(&Valuation) -> Value + Send + Sync,
{
    fn eval(&self, w: &Valuation) -> Value {
        (self.0)(w)
    }
}

/// A consistency violation: a derived node whose stored value disagrees
/// with its structural function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub node: NodeId,
    pub expected: Value,
    pub actual: Value,
}

/// Builder for [`Model`].
///
/// Nodes referenced by `edge` are registered implicitly; `function` may be
/// called before or after the node's edges are declared. All validation
/// happens in [`build`](ModelBuilder::build).
pub struct ModelBuilder {
    graph: DiGraph<NodeId, ()>,
    index: BTreeMap<NodeId, NodeIndex>,
    domains: BTreeMap<NodeId, Domain>,
    functions: BTreeMap<NodeId, Box<dyn StructuralFn>>,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: BTreeMap::new(),
            domains: BTreeMap::new(),
            functions: BTreeMap::new(),
        }
    }

    fn index_of(&mut self, node: NodeId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.index.insert(node, idx);
        idx
    }

    /// Register a node (with default domain metadata).
    pub fn node(mut self, node: impl Into<NodeId>) -> Self {
        self.index_of(node.into());
        self
    }

    /// Register a node with explicit domain metadata.
    pub fn node_with_domain(mut self, node: impl Into<NodeId>, domain: Domain) -> Self {
        let node = node.into();
        self.index_of(node.clone());
        self.domains.insert(node, domain);
        self
    }

    /// Add a directed edge `from -> to`, registering both endpoints.
    pub fn edge(mut self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        let a = self.index_of(from.into());
        let b = self.index_of(to.into());
        self.graph.add_edge(a, b, ());
        self
    }

    /// Attach a structural function to a node.
    pub fn function(mut self, node: impl Into<NodeId>, f: impl StructuralFn + 'static) -> Self {
        self.functions.insert(node.into(), Box::new(f));
        self
    }

    /// Attach a closure as a node's structural function.
    pub fn function_fn(
        self,
        node: impl Into<NodeId>,
        f: impl Fn(&Valuation) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.function(node, FnAdapter(f))
    }

    /// Validate and freeze the model.
    ///
    /// Fails if a function is attached to an unknown node or a root, or if
    /// a derived node has no function. A cyclic graph still builds — the
    /// evaluators reject it through [`Model::is_acyclic`] — so structural
    /// problems surface as a queryable predicate rather than a panic.
    pub fn build(self) -> ModelResult<Model> {
        let mut roots = BTreeSet::new();
        let mut derived = BTreeSet::new();
        let mut parents: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();

        for idx in self.graph.node_indices() {
            let node = self.graph[idx].clone();
            let parent_set: BTreeSet<NodeId> = self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .map(|p| self.graph[p].clone())
                .collect();
            if parent_set.is_empty() {
                roots.insert(node.clone());
            } else {
                derived.insert(node.clone());
            }
            parents.insert(node, parent_set);
        }

        for node in self.functions.keys() {
            if !parents.contains_key(node) {
                return Err(ModelError::UnknownNode(node.clone()));
            }
            if roots.contains(node) {
                return Err(ModelError::FunctionOnRoot(node.clone()));
            }
        }
        for node in &derived {
            if !self.functions.contains_key(node) {
                return Err(ModelError::MissingFunction(node.clone()));
            }
        }

        let topo = toposort(&self.graph, None)
            .ok()
            .map(|order| order.into_iter().map(|i| self.graph[i].clone()).collect());

        Ok(Model {
            roots,
            derived,
            parents,
            topo,
            domains: self.domains,
            functions: self.functions,
        })
    }
}

/// An immutable structural function model.
///
/// Read-only for the lifetime of every inference call and safe to share
/// across concurrent calls (`Send + Sync`, nothing to lock).
pub struct Model {
    roots: BTreeSet<NodeId>,
    derived: BTreeSet<NodeId>,
    /// Parent sets, one entry per node (roots map to the empty set).
    parents: BTreeMap<NodeId, BTreeSet<NodeId>>,
    /// Cached topological order; `None` when the graph has a cycle.
    topo: Option<Vec<NodeId>>,
    domains: BTreeMap<NodeId, Domain>,
    functions: BTreeMap<NodeId, Box<dyn StructuralFn>>,
}

impl Model {
    /// Start building a model.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    /// The root (exogenous) nodes: no incoming edges, values supplied
    /// externally.
    pub fn roots(&self) -> &BTreeSet<NodeId> {
        &self.roots
    }

    /// The derived (endogenous) nodes: at least one incoming edge, values
    /// computed by the attached structural function.
    pub fn derived(&self) -> &BTreeSet<NodeId> {
        &self.derived
    }

    /// Iterate over all nodes in order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.parents.keys()
    }

    /// Total node count.
    pub fn node_count(&self) -> usize {
        self.parents.len()
    }

    /// Whether the node is part of this model.
    pub fn contains(&self, node: &NodeId) -> bool {
        self.parents.contains_key(node)
    }

    /// The parent set of a node, or `None` for an unknown node. Roots
    /// have an empty parent set.
    pub fn parents(&self, node: &NodeId) -> Option<&BTreeSet<NodeId>> {
        self.parents.get(node)
    }

    /// A topological order consistent with the edges, cached at build
    /// time. `None` when the graph has a cycle.
    pub fn topological_order(&self) -> Option<&[NodeId]> {
        self.topo.as_deref()
    }

    /// Whether the graph is a DAG.
    pub fn is_acyclic(&self) -> bool {
        self.topo.is_some()
    }

    /// The structural function attached to a derived node.
    pub fn function(&self, node: &NodeId) -> Option<&dyn StructuralFn> {
        self.functions.get(node).map(|f| f.as_ref())
    }

    /// Domain metadata for a node (default `Real` when never declared).
    pub fn domain(&self, node: &NodeId) -> Domain {
        self.domains.get(node).copied().unwrap_or_default()
    }

    fn check_total(&self, w_total: &Valuation) -> ModelResult<()> {
        for node in w_total.nodes() {
            if !self.contains(node) {
                return Err(ModelError::UnknownNode(node.clone()));
            }
        }
        for node in self.nodes() {
            if !w_total.contains(node) {
                return Err(ModelError::Uncovered(node.clone()));
            }
        }
        Ok(())
    }

    /// Whether a total valuation satisfies every structural function.
    ///
    /// Diagnostic check, not part of the inference hot path.
    pub fn satisfied_by(&self, w_total: &Valuation) -> ModelResult<bool> {
        self.check_total(w_total)?;
        for node in &self.derived {
            let f = self
                .functions
                .get(node)
                .ok_or_else(|| ModelError::MissingFunction(node.clone()))?;
            let actual = w_total
                .get(node)
                .ok_or_else(|| ModelError::Uncovered(node.clone()))?;
            if f.eval(w_total) != *actual {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Every node whose stored value disagrees with its structural
    /// function, with expected and actual values for debugging.
    pub fn all_violations(&self, w_total: &Valuation) -> ModelResult<Vec<Violation>> {
        self.check_total(w_total)?;
        let mut violations = Vec::new();
        for node in &self.derived {
            let f = self
                .functions
                .get(node)
                .ok_or_else(|| ModelError::MissingFunction(node.clone()))?;
            let actual = w_total
                .get(node)
                .ok_or_else(|| ModelError::Uncovered(node.clone()))?;
            let expected = f.eval(w_total);
            if expected != *actual {
                violations.push(Violation {
                    node: node.clone(),
                    expected,
                    actual: actual.clone(),
                });
            }
        }
        Ok(violations)
    }
}
