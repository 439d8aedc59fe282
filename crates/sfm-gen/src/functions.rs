//! Randomly initialized structural function families.

use rand::Rng;
use sfm_model::{NodeId, StructuralFn, Valuation, Value};

/// Weighted sum of numeric parent values plus a bias:
/// `f(x) = w1*x1 + ... + wn*xn + b`, output `Value::Number`.
///
/// Total over any valuation: a missing or non-numeric parent contributes
/// zero rather than trapping.
pub struct LinearFn {
    parents: Vec<NodeId>,
    weights: Vec<f64>,
    bias: f64,
}

impl LinearFn {
    /// Fixed weights. `weights` is zipped against `parents`; shorter
    /// sides are truncated.
    pub fn new(parents: Vec<NodeId>, weights: Vec<f64>, bias: f64) -> Self {
        Self {
            parents,
            weights,
            bias,
        }
    }

    /// Weights and bias drawn uniformly from [-1, 1).
    pub fn random(parents: Vec<NodeId>, rng: &mut impl Rng) -> Self {
        let weights = parents.iter().map(|_| rng.gen_range(-1.0..1.0)).collect();
        let bias = rng.gen_range(-1.0..1.0);
        Self::new(parents, weights, bias)
    }
}

impl StructuralFn for LinearFn {
    fn eval(&self, w: &Valuation) -> Value {
        let sum: f64 = self
            .parents
            .iter()
            .zip(&self.weights)
            .map(|(p, weight)| {
                weight * w.get(p).and_then(Value::as_number).unwrap_or(0.0)
            })
            .sum();
        Value::Number(sum + self.bias)
    }
}

/// Linear congruence over integer parent values:
/// `f(x) = (a1*x1 + ... + an*xn + c) mod m`, output `Value::Int`.
///
/// The modulus makes the output space small, so changed inputs frequently
/// reproduce the old output — the fixture of choice for demotion tests.
pub struct CongruenceFn {
    parents: Vec<NodeId>,
    coeffs: Vec<i64>,
    offset: i64,
    modulus: i64,
}

impl CongruenceFn {
    /// Fixed coefficients. `modulus` must be positive.
    pub fn new(parents: Vec<NodeId>, coeffs: Vec<i64>, offset: i64, modulus: i64) -> Self {
        Self {
            parents,
            coeffs,
            offset,
            modulus: modulus.max(1),
        }
    }

    /// Coefficients and offset drawn uniformly from 1..m.
    pub fn random(parents: Vec<NodeId>, modulus: i64, rng: &mut impl Rng) -> Self {
        let modulus = modulus.max(2);
        let coeffs = parents.iter().map(|_| rng.gen_range(1..modulus)).collect();
        let offset = rng.gen_range(1..modulus);
        Self::new(parents, coeffs, offset, modulus)
    }
}

impl StructuralFn for CongruenceFn {
    fn eval(&self, w: &Valuation) -> Value {
        let sum: i64 = self
            .parents
            .iter()
            .zip(&self.coeffs)
            .map(|(p, a)| a * w.get(p).and_then(Value::as_int).unwrap_or(0))
            .sum::<i64>()
            + self.offset;
        Value::Int(sum.rem_euclid(self.modulus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_eval() {
        let f = LinearFn::new(
            vec![NodeId::from("x"), NodeId::from("y")],
            vec![2.0, -1.0],
            0.5,
        );
        let mut w = Valuation::new();
        w.insert("x", 3.0);
        w.insert("y", 1.0);
        assert_eq!(f.eval(&w), Value::Number(5.5));
    }

    #[test]
    fn test_congruence_wraps_into_range() {
        let f = CongruenceFn::new(vec![NodeId::from("x")], vec![3], 2, 5);
        let mut w = Valuation::new();
        w.insert("x", 4_i64);
        // 3*4 + 2 = 14, 14 mod 5 = 4
        assert_eq!(f.eval(&w), Value::Int(4));
    }

    #[test]
    fn test_congruence_total_on_missing_parent() {
        let f = CongruenceFn::new(vec![NodeId::from("x")], vec![3], 2, 5);
        assert_eq!(f.eval(&Valuation::new()), Value::Int(2));
    }
}
