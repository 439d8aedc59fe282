//! Return-side inference metrics.

use serde::Serialize;
use sfm_model::Valuation;

/// Work counters for one inference call.
///
/// Carried on the result instead of ambient globals so the evaluators
/// stay pure and testable in isolation. The cost bound of contrastive
/// inference — `evaluations` never exceeds the number of derived nodes,
/// and is strictly smaller whenever changes are confined — is asserted
/// against these counters in the test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InferStats {
    /// Structural-function invocations performed.
    pub evaluations: usize,
    /// Nodes whose baseline value was reused without evaluation.
    pub reused: usize,
    /// Dirty nodes demoted to clean because re-evaluation reproduced the
    /// baseline value.
    pub demoted: usize,
}

/// The outcome of an inference call: the requested valuation plus the
/// work it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Inferred {
    /// Total valuation for full/contrastive inference; restricted to the
    /// requested targets for goal-directed inference.
    pub valuation: Valuation,
    pub stats: InferStats,
}
