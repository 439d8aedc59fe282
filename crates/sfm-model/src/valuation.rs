//! Valuations (node-to-value assignments) and contrast coding.
//!
//! A valuation may be partial (a delta, a target slice) or total (one
//! value per model node). Contrast coding is the serialization contract
//! for communicating "what changed" between inference calls: encode keeps
//! only the keys that differ from a reference, decode rebuilds the total
//! valuation from the reference plus the delta.

use crate::error::{ModelError, ModelResult};
use crate::{NodeId, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mapping from node to value.
///
/// Equality is key-by-key value equality, which is what the round-trip
/// laws of contrast coding rely on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Valuation {
    values: BTreeMap<NodeId, Value>,
}

impl Valuation {
    /// Create an empty valuation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a node, returning the previous value if any.
    pub fn insert(&mut self, node: impl Into<NodeId>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(node.into(), value.into())
    }

    /// Look up a node's value.
    pub fn get(&self, node: &NodeId) -> Option<&Value> {
        self.values.get(node)
    }

    /// Whether a node has a value here.
    pub fn contains(&self, node: &NodeId) -> bool {
        self.values.contains_key(node)
    }

    /// Number of assigned nodes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no node is assigned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (node, value) pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Value)> {
        self.values.iter()
    }

    /// Iterate over the assigned nodes in order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.values.keys()
    }

    /// The sub-valuation over the given nodes. Nodes without a value
    /// here are silently skipped.
    pub fn restrict<'a>(&self, nodes: impl IntoIterator<Item = &'a NodeId>) -> Valuation {
        nodes
            .into_iter()
            .filter_map(|n| self.values.get(n).map(|v| (n.clone(), v.clone())))
            .collect()
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FromIterator<(NodeId, Value)> for Valuation {
    fn from_iter<I: IntoIterator<Item = (NodeId, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<NodeId, Value>> for Valuation {
    fn from(values: BTreeMap<NodeId, Value>) -> Self {
        Self { values }
    }
}

impl<'a> IntoIterator for &'a Valuation {
    type Item = (&'a NodeId, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, NodeId, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Encode `w` against `reference`: keep only the keys whose value differs.
///
/// Every key of `w` must exist in `reference`; an unknown key is an error
/// rather than a silent pass-through.
pub fn contrast_encode(w: &Valuation, reference: &Valuation) -> ModelResult<Valuation> {
    let mut delta = Valuation::new();
    for (node, new_value) in w.iter() {
        match reference.get(node) {
            None => return Err(ModelError::UnknownNode(node.clone())),
            Some(old_value) if old_value != new_value => {
                delta.insert(node.clone(), new_value.clone());
            }
            Some(_) => {}
        }
    }
    Ok(delta)
}

/// Decode a delta against `reference`: total over `reference`'s keys, with
/// the delta's values overriding where present.
pub fn contrast_decode(delta: &Valuation, reference: &Valuation) -> Valuation {
    reference
        .iter()
        .map(|(node, ref_value)| {
            let value = delta.get(node).unwrap_or(ref_value).clone();
            (node.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn val(pairs: &[(&str, i64)]) -> Valuation {
        pairs
            .iter()
            .map(|(n, v)| (NodeId::from(*n), Value::Int(*v)))
            .collect()
    }

    #[test]
    fn test_encode_keeps_only_differences() {
        let w0 = val(&[("a", 1), ("b", 2), ("c", 3)]);
        let w1 = val(&[("a", 1), ("b", 5), ("c", 3)]);
        let delta = contrast_encode(&w1, &w0).unwrap();
        assert_eq!(delta, val(&[("b", 5)]));
    }

    #[test]
    fn test_encode_rejects_unknown_key() {
        let w0 = val(&[("a", 1)]);
        let w1 = val(&[("a", 1), ("z", 9)]);
        assert!(matches!(
            contrast_encode(&w1, &w0),
            Err(ModelError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_decode_overrides_reference() {
        let w0 = val(&[("a", 1), ("b", 2)]);
        let delta = val(&[("b", 7)]);
        assert_eq!(contrast_decode(&delta, &w0), val(&[("a", 1), ("b", 7)]));
    }

    #[test]
    fn test_round_trip_laws() {
        let w0 = val(&[("a", 1), ("b", 2), ("c", 3)]);
        let w1 = val(&[("a", 4), ("b", 2), ("c", 6)]);
        let d = contrast_encode(&w1, &w0).unwrap();
        assert_eq!(contrast_decode(&d, &w0), w1);
        assert_eq!(contrast_encode(&contrast_decode(&d, &w0), &w0).unwrap(), d);
    }

    #[test]
    fn test_restrict_skips_missing() {
        let w = val(&[("a", 1), ("b", 2)]);
        let keep = [NodeId::from("b"), NodeId::from("z")];
        assert_eq!(w.restrict(keep.iter()), val(&[("b", 2)]));
    }

    #[test]
    fn test_json_round_trip() {
        let w = val(&[("a", 1), ("b", 2)]);
        let back = Valuation::from_json(&w.to_json()).unwrap();
        assert_eq!(back, w);
    }
}
