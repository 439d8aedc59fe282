//! Integration tests for the model container:
//! - builder validation (functions vs. structure)
//! - root/derived classification and parent lookup
//! - topological order and cycle detection
//! - consistency checking (satisfied_by / all_violations)

use pretty_assertions::assert_eq;
use sfm_model::{Model, ModelError, NodeId, Valuation, Value};

fn node(name: &str) -> NodeId {
    NodeId::from(name)
}

/// The 4-node diamond: A feeds B and C, B and C feed D.
/// B = A + 1, C = A * 2, D = B + C (all over Int).
fn diamond() -> Model {
    Model::builder()
        .edge("a", "b")
        .edge("a", "c")
        .edge("b", "d")
        .edge("c", "d")
        .function_fn("b", |w: &Valuation| {
            Value::Int(w.get(&node("a")).and_then(Value::as_int).unwrap_or(0) + 1)
        })
        .function_fn("c", |w: &Valuation| {
            Value::Int(w.get(&node("a")).and_then(Value::as_int).unwrap_or(0) * 2)
        })
        .function_fn("d", |w: &Valuation| {
            let b = w.get(&node("b")).and_then(Value::as_int).unwrap_or(0);
            let c = w.get(&node("c")).and_then(Value::as_int).unwrap_or(0);
            Value::Int(b + c)
        })
        .build()
        .expect("diamond model builds")
}

// ── Builder validation ────────────────────────────────────────────────────

#[test]
fn build_rejects_function_on_root() {
    let result = Model::builder()
        .edge("a", "b")
        .function_fn("a", |_: &Valuation| Value::Int(0))
        .function_fn("b", |_: &Valuation| Value::Int(0))
        .build();
    assert!(matches!(result, Err(ModelError::FunctionOnRoot(n)) if n == node("a")));
}

#[test]
fn build_rejects_function_on_unknown_node() {
    let result = Model::builder()
        .edge("a", "b")
        .function_fn("b", |_: &Valuation| Value::Int(0))
        .function_fn("zzz", |_: &Valuation| Value::Int(0))
        .build();
    assert!(matches!(result, Err(ModelError::UnknownNode(n)) if n == node("zzz")));
}

#[test]
fn build_rejects_derived_without_function() {
    let result = Model::builder().edge("a", "b").build();
    assert!(matches!(result, Err(ModelError::MissingFunction(n)) if n == node("b")));
}

// ── Structure queries ─────────────────────────────────────────────────────

#[test]
fn roots_and_derived_classification() {
    let m = diamond();
    assert_eq!(
        m.roots().iter().cloned().collect::<Vec<_>>(),
        vec![node("a")]
    );
    assert_eq!(
        m.derived().iter().cloned().collect::<Vec<_>>(),
        vec![node("b"), node("c"), node("d")]
    );
    assert_eq!(m.node_count(), 4);
    assert!(m.contains(&node("d")));
    assert!(!m.contains(&node("zzz")));
}

#[test]
fn parent_lookup() {
    let m = diamond();
    assert!(m.parents(&node("a")).is_some_and(|p| p.is_empty()));
    let d_parents = m.parents(&node("d")).expect("d exists");
    assert_eq!(
        d_parents.iter().cloned().collect::<Vec<_>>(),
        vec![node("b"), node("c")]
    );
    assert!(m.parents(&node("zzz")).is_none());
}

#[test]
fn topological_order_respects_edges() {
    let m = diamond();
    let order = m.topological_order().expect("acyclic");
    assert_eq!(order.len(), 4);
    let pos = |n: &NodeId| order.iter().position(|x| x == n).expect("in order");
    for child in m.derived() {
        for parent in m.parents(child).expect("derived node exists") {
            assert!(pos(parent) < pos(child), "{parent} must precede {child}");
        }
    }
}

#[test]
fn cycle_is_detected_not_rejected() {
    let m = Model::builder()
        .edge("a", "b")
        .edge("b", "a")
        .function_fn("a", |_: &Valuation| Value::Int(0))
        .function_fn("b", |_: &Valuation| Value::Int(0))
        .build()
        .expect("cyclic models still build");
    assert!(!m.is_acyclic());
    assert!(m.topological_order().is_none());
}

// ── Consistency checks ────────────────────────────────────────────────────

fn diamond_valuation(a: i64, b: i64, c: i64, d: i64) -> Valuation {
    let mut w = Valuation::new();
    w.insert("a", a);
    w.insert("b", b);
    w.insert("c", c);
    w.insert("d", d);
    w
}

#[test]
fn satisfied_by_consistent_valuation() {
    let m = diamond();
    assert!(m.satisfied_by(&diamond_valuation(3, 4, 6, 10)).unwrap());
    assert!(m.all_violations(&diamond_valuation(3, 4, 6, 10)).unwrap().is_empty());
}

#[test]
fn violations_report_expected_and_actual() {
    let m = diamond();
    let w = diamond_valuation(3, 4, 6, 99);
    assert!(!m.satisfied_by(&w).unwrap());
    let violations = m.all_violations(&w).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].node, node("d"));
    assert_eq!(violations[0].expected, Value::Int(10));
    assert_eq!(violations[0].actual, Value::Int(99));
}

#[test]
fn consistency_check_requires_total_valuation() {
    let m = diamond();
    let mut partial = Valuation::new();
    partial.insert("a", 3);
    assert!(matches!(
        m.satisfied_by(&partial),
        Err(ModelError::Uncovered(_))
    ));

    let mut stray = diamond_valuation(3, 4, 6, 10);
    stray.insert("zzz", 0);
    assert!(matches!(
        m.satisfied_by(&stray),
        Err(ModelError::UnknownNode(n)) if n == node("zzz")
    ));
}
