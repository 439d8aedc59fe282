//! Inference engine for structural function models.
//!
//! Evaluates a DAG of pure structural functions under three regimes:
//! - [`infer_full`]: forward evaluation of every node from a complete
//!   root valuation;
//! - [`infer_delta`]: contrastive evaluation that, given a baseline and a
//!   changed subset of roots, recomputes only nodes whose value could
//!   have changed (with per-node demotion when a recomputed value matches
//!   baseline);
//! - [`infer_partial`] / [`infer_partial_delta`]: goal-directed
//!   evaluation of a target subset, visiting only the targets' ancestor
//!   closure via backward traversal, without a global topological sort.
//!
//! Every entry point is a pure function of its inputs: the model is
//! shared read-only, no state outlives a call, and diagnostics come back
//! as [`InferStats`] on the result rather than ambient counters.

mod checks;
mod contrast;
mod error;
mod forward;
mod partial;
mod report;

pub use contrast::{classify_dirty, infer_delta};
pub use error::{InferError, InferResult};
pub use forward::infer_full;
pub use partial::{infer_partial, infer_partial_delta};
pub use report::{InferStats, Inferred};
