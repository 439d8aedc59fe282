//! Full forward inference.

use crate::checks::{check_root_coverage, require_order};
use crate::error::InferResult;
use crate::report::{InferStats, Inferred};
use sfm_model::{Model, ModelError, Valuation};

/// Evaluate every node from a complete root valuation.
///
/// Walks the model's cached topological order once; every derived node is
/// evaluated exactly once against the working valuation, whose parent
/// entries are guaranteed present by order correctness. O(V + E) plus one
/// function invocation per derived node.
pub fn infer_full(model: &Model, exo: &Valuation) -> InferResult<Inferred> {
    let order = require_order(model)?;
    check_root_coverage(model, exo)?;

    let mut w = exo.clone();
    let mut stats = InferStats::default();
    for node in order {
        if model.roots().contains(node) {
            continue;
        }
        let f = model
            .function(node)
            .ok_or_else(|| ModelError::MissingFunction(node.clone()))?;
        let value = f.eval(&w);
        stats.evaluations += 1;
        w.insert(node.clone(), value);
    }
    Ok(Inferred {
        valuation: w,
        stats,
    })
}
