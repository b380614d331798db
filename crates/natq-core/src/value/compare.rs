use crate::value::Value;
use std::{cmp::Ordering, mem::discriminant};

///
/// Value comparison semantics
///
/// Defines which runtime value comparisons are permitted and how they
/// behave. Numeric variants (`Int`, `Uint`, `Float64`) widen to a common
/// domain for both equality and ordering; every other comparison is
/// strict per-variant. This module is schema-agnostic and operates
/// purely on runtime `Value`s.
///

///
/// NumericRepr
///

enum NumericRepr {
    Int(i128),
    F64(f64),
}

/// Total canonical comparator over arbitrary variants.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
///
/// Mixed-variant comparisons are rank-only and must remain deterministic.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Strict comparator for identical orderable variants.
///
/// Returns `None` for mismatched or non-orderable variants.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Float64(a), Value::Float64(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Ulid(a), Value::Ulid(b)) => Some(a.cmp(b)),
        (Value::Unit, Value::Unit) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Perform equality comparison under the engine's fixed coercion.
///
/// Returns `None` if the comparison is not defined for the given values.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    if left.is_numeric() && right.is_numeric() {
        return cmp_numeric(left, right).map(Ordering::is_eq);
    }

    same_variant(left, right).then(|| left == right)
}

/// Perform ordering comparison under the engine's fixed coercion.
///
/// Returns `None` if ordering is undefined for the given values.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    if left.is_numeric() && right.is_numeric() {
        return cmp_numeric(left, right);
    }

    if !same_variant(left, right) {
        return None;
    }

    strict_order_cmp(left, right)
}

/// Cross-variant numeric comparison; returns None if non-numeric.
#[must_use]
pub fn cmp_numeric(left: &Value, right: &Value) -> Option<Ordering> {
    match (numeric_repr(left)?, numeric_repr(right)?) {
        (NumericRepr::Int(a), NumericRepr::Int(b)) => Some(a.cmp(&b)),
        (NumericRepr::F64(a), NumericRepr::F64(b)) => a.partial_cmp(&b),
        (NumericRepr::Int(a), NumericRepr::F64(b)) => int_as_f64(a).partial_cmp(&b),
        (NumericRepr::F64(a), NumericRepr::Int(b)) => a.partial_cmp(&int_as_f64(b)),
    }
}

fn numeric_repr(value: &Value) -> Option<NumericRepr> {
    match value {
        Value::Float64(f) => Some(NumericRepr::F64(f.get())),
        Value::Int(i) => Some(NumericRepr::Int(i128::from(*i))),
        Value::Uint(u) => Some(NumericRepr::Int(i128::from(*u))),
        _ => None,
    }
}

// Integer-vs-float mixing loses precision beyond 2^53; acceptable for
// comparison semantics, matching float arithmetic elsewhere.
#[expect(clippy::cast_precision_loss)]
const fn int_as_f64(n: i128) -> f64 {
    n as f64
}

fn same_variant(left: &Value, right: &Value) -> bool {
    discriminant(left) == discriminant(right)
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::List(a), Value::List(b)) => canonical_cmp_value_list(a, b),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => strict_order_cmp(left, right).unwrap_or(Ordering::Equal),
    }
}

fn canonical_cmp_value_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}
