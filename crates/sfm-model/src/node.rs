use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque node identity.
///
/// Totally ordered and hashable so it can key `BTreeMap`s and sets; the
/// engine never interprets the name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The raw name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Debug prints just the quoted name so node lists in error messages stay
// readable ("a" rather than NodeId("a")).
impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Per-node domain metadata.
///
/// Stored on the model for callers and generators to consult; inference
/// never re-validates values against it — domain validity of supplied
/// root values is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    Real,
    Integer,
    /// Integers modulo the given divisor.
    IntegerMod(u64),
    Boolean,
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_ordering() {
        let a = NodeId::from("a");
        let b = NodeId::from("b");
        assert!(a < b);
        assert_eq!(a, NodeId::new("a"));
    }

    #[test]
    fn test_node_id_debug_is_bare_name() {
        assert_eq!(format!("{:?}", NodeId::from("x1")), "\"x1\"");
        assert_eq!(format!("{}", NodeId::from("x1")), "x1");
    }

    #[test]
    fn test_domain_default() {
        assert_eq!(Domain::default(), Domain::Real);
    }
}
