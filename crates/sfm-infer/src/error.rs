//! Inference error types.

use sfm_model::{ModelError, NodeId};
use thiserror::Error;

/// Errors reported by the inference entry points.
///
/// None of these are recoverable inside the engine: inference is a pure
/// computation, so the only remedy is re-invocation with corrected
/// inputs. No partial result is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum InferError {
    /// The model's graph has a cycle; evaluation must not proceed.
    #[error("model graph contains a cycle; inference requires a DAG")]
    CyclicModel,

    /// The exogenous valuation does not cover exactly the root set.
    #[error("root valuation mismatch (missing: {missing:?}, extra: {extra:?})")]
    InputCoverage {
        missing: Vec<NodeId>,
        extra: Vec<NodeId>,
    },

    /// The baseline valuation does not cover exactly the node set.
    #[error("baseline valuation is not total (missing: {missing:?}, extra: {extra:?})")]
    BaselineCoverage {
        missing: Vec<NodeId>,
        extra: Vec<NodeId>,
    },

    /// A requested target node does not exist in the model.
    #[error("target node {0} is not in the model")]
    UnknownTarget(NodeId),

    /// The changed-roots valuation names a node that is not a root.
    #[error("changed node {0} is not a root")]
    NonRootChange(NodeId),

    /// A model-level inconsistency surfaced during inference.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result alias for inference operations.
pub type InferResult<T> = Result<T, InferError>;
