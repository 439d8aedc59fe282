//! Random structural function models.
//!
//! Builds seeded random DAGs with randomly initialized structural
//! functions so inference algorithms can be tested against models with
//! arbitrary connections. Two function families:
//! - [`LinearFn`] over floats — the generic numeric case;
//! - [`CongruenceFn`] over integers mod m — collision-rich, so distinct
//!   inputs often map to the same output, exercising demotion.
//!
//! This crate is a collaborator of the engine, not part of it: the
//! inference crates consume it only as a test fixture source.

mod functions;
mod random;

pub use functions::{CongruenceFn, LinearFn};
pub use random::{
    random_congruence_model, random_dag, random_int_roots, random_linear_model,
    random_number_roots,
};
