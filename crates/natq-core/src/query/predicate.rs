use crate::{
    query::operand::{FieldPath, IntoOperand, Operand},
    traits::FieldValue,
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

///
/// Predicate AST
///
/// Pure, schema-agnostic representation of query predicates.
///
/// Predicates can be:
/// - `True` or `False` constants
/// - Single clauses comparing a field path with an operand
/// - Composite predicates: `And`, `Or`, and negation `Not`.
///
/// All interpretation happens at evaluation time.
///

///
/// CmpOp
///
/// Inequality has no tag of its own; `ne` builders produce `Not(Eq)`
/// so negation semantics live in exactly one place.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CmpOp {
    Eq,
    EqCi,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Between,
    Contains,
    ContainsCi,
    StartsWith,
    StartsWithCi,
    EndsWith,
    EndsWithCi,
    Search,
    Regex,
    RegexCi,
    Truthy,
}

///
/// Clause
/// one comparison: `path op operand`
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Clause {
    pub path: FieldPath,
    pub op: CmpOp,
    pub operand: Operand,
}

impl Clause {
    #[must_use]
    pub const fn new(path: FieldPath, op: CmpOp, operand: Operand) -> Self {
        Self { path, op, operand }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Predicate {
    #[default]
    True,
    False,
    Clause(Clause),
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
}

impl Predicate {
    // --- Clause ---

    /// Create a single clause: `field op operand`.
    pub fn clause(field: impl Into<String>, op: CmpOp, operand: impl IntoOperand) -> Self {
        Self::Clause(Clause::new(
            FieldPath::new(field),
            op,
            operand.into_operand(),
        ))
    }

    // --- Equality ---

    pub fn eq(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, CmpOp::Eq, value.to_value())
    }

    pub fn eq_ci(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, CmpOp::EqCi, value.to_value())
    }

    pub fn ne(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::eq(field, value).not()
    }

    // --- Ordering ---

    pub fn lt(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, CmpOp::Lt, value.to_value())
    }

    pub fn lte(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, CmpOp::Lte, value.to_value())
    }

    pub fn gt(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, CmpOp::Gt, value.to_value())
    }

    pub fn gte(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, CmpOp::Gte, value.to_value())
    }

    // --- Presence ---

    pub fn truthy(field: impl Into<String>) -> Self {
        Self::clause(field, CmpOp::Truthy, Value::Unit)
    }

    /// Combine two predicates into an `And` predicate.
    ///
    /// This flattens nested `And`s to avoid deep nesting (e.g., `(a AND b) AND c` becomes `AND[a,b,c]`).
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::And(mut a), Self::And(mut b)) => {
                a.append(&mut b);
                Self::And(a)
            }
            (Self::And(mut a), b) => {
                a.push(b);
                Self::And(a)
            }
            (a, Self::And(mut b)) => {
                let mut list = vec![a];
                list.append(&mut b);
                Self::And(list)
            }
            (a, b) => Self::And(vec![a, b]),
        }
    }

    /// Negate this predicate.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Combine two predicates into an `Or` predicate,
    /// flattening nested `Or`s similarly to `and`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Or(mut a), Self::Or(mut b)) => {
                a.append(&mut b);
                Self::Or(a)
            }
            (Self::Or(mut a), b) => {
                a.push(b);
                Self::Or(a)
            }
            (a, Self::Or(mut b)) => {
                let mut list = vec![a];
                list.append(&mut b);
                Self::Or(list)
            }
            (a, b) => Self::Or(vec![a, b]),
        }
    }

    /// Simplifies the predicate recursively, applying rules like:
    /// - Eliminate double negation `NOT NOT x` -> `x`
    /// - Apply De Morgan's laws:
    ///   - `NOT (AND [a, b])` -> `OR [NOT a, NOT b]`
    ///   - `NOT (OR [a, b])` -> `AND [NOT a, NOT b]`
    /// - Flatten nested `And` and `Or` predicates
    /// - Remove neutral elements:
    ///   - `AND [True, x]` -> `x`
    ///   - `OR [False, x]` -> `x`
    /// - Short circuit on constants:
    ///   - `AND` with `False` -> `False`
    ///   - `OR` with `True` -> `True`
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::Not(inner) => match *inner {
                Self::True => Self::False,
                Self::False => Self::True,
                Self::Not(inner2) => (*inner2).simplify(),
                Self::And(children) => {
                    // De Morgan's: NOT(AND(...)) == OR(NOT(...))
                    Self::Or(children.into_iter().map(|c| c.not().simplify()).collect())
                }
                Self::Or(children) => {
                    // De Morgan's: NOT(OR(...)) == AND(NOT(...))
                    Self::And(children.into_iter().map(|c| c.not().simplify()).collect())
                }
                x @ Self::Clause(_) => Self::Not(Box::new(x)),
            },

            Self::And(children) => {
                // Recursively simplify and flatten `And` children
                let flat = Self::simplify_children(children, |e| matches!(e, Self::And(_)));

                // If any child is `False`, whole AND is False (short circuit)
                if flat.iter().any(|e| matches!(e, Self::False)) {
                    Self::False
                } else {
                    // Remove neutral elements `True`
                    let filtered: Vec<_> = flat
                        .into_iter()
                        .filter(|e| !matches!(e, Self::True))
                        .collect();

                    // If empty after filtering, all were True -> return True
                    match filtered.len() {
                        0 => Self::True,
                        1 => filtered.into_iter().next().unwrap(),
                        _ => Self::And(filtered),
                    }
                }
            }

            Self::Or(children) => {
                // Recursively simplify and flatten `Or` children
                let flat = Self::simplify_children(children, |e| matches!(e, Self::Or(_)));

                // If any child is `True`, whole OR is True (short circuit)
                if flat.iter().any(|e| matches!(e, Self::True)) {
                    Self::True
                } else {
                    // Remove neutral elements `False`
                    let filtered: Vec<_> = flat
                        .into_iter()
                        .filter(|e| !matches!(e, Self::False))
                        .collect();

                    // If empty after filtering, all were False -> return False
                    match filtered.len() {
                        0 => Self::False,
                        1 => filtered.into_iter().next().unwrap(),
                        _ => Self::Or(filtered),
                    }
                }
            }

            // Clauses and constants are already simplest forms
            x => x,
        }
    }

    /// Helper to simplify and flatten nested `And` or `Or` children.
    ///
    /// - `children`: the children predicates to simplify and flatten
    /// - `flatten_if`: a predicate to decide if the child should be flattened
    fn simplify_children(children: Vec<Self>, flatten_if: fn(&Self) -> bool) -> Vec<Self> {
        let mut flat = Vec::with_capacity(children.len());

        for child in children {
            let simplified = child.simplify();
            if flatten_if(&simplified) {
                if let Self::And(nested) | Self::Or(nested) = simplified {
                    flat.extend(nested);
                }
            } else {
                flat.push(simplified);
            }
        }

        flat
    }
}

///
/// Bit Operations
/// allow us to do | & and ! on predicates
///

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.clone().and(rhs.clone())
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.clone().or(rhs.clone())
    }
}

impl Not for Predicate {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

///
/// TESTS
///
