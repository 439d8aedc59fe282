//! Shared types for the structural function model engine.
//!
//! This crate defines the immutable model container (`Model`), node
//! identity and value types, valuations (partial or total node-to-value
//! assignments), and the contrast coding used to communicate "what
//! changed" between inference calls.

mod error;
mod model;
mod node;
mod value;
mod valuation;

pub use error::{ModelError, ModelResult};
pub use model::{Model, ModelBuilder, StructuralFn, Violation};
pub use node::{Domain, NodeId};
pub use value::Value;
pub use valuation::{contrast_decode, contrast_encode, Valuation};
