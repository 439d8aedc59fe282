//! Model construction and consistency-check errors.

use crate::NodeId;
use thiserror::Error;

/// Errors raised while building a model or checking a valuation against it.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A referenced node is not part of the model.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// A structural function was attached to a root (exogenous) node.
    #[error("node {0} is a root but has an attached function")]
    FunctionOnRoot(NodeId),

    /// A derived (endogenous) node has no structural function.
    #[error("derived node {0} has no attached function")]
    MissingFunction(NodeId),

    /// A check requiring a total valuation was given one missing a node.
    #[error("valuation does not cover node {0}")]
    Uncovered(NodeId),
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
