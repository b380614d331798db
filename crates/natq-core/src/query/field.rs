use crate::{
    model::FieldModel,
    query::{
        expr::{ArithOp, Expr, IntoExpr},
        operand::{FieldPath, IntoOperand, Operand},
        predicate::{Clause, CmpOp, Predicate},
    },
    value::Value,
};
use std::ops::Not;

///
/// FieldExpr
///
/// Zero-cost placeholder for one model field, used to build predicates
/// and expressions through comparison-shaped methods and operators.
/// Carries only a `&'static str` and derefs to `str`.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct FieldExpr(&'static str);

impl FieldExpr {
    /// Create a new field placeholder from a raw name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Create a field placeholder from field metadata.
    #[must_use]
    pub const fn from_model(model: &FieldModel) -> Self {
        Self(model.name)
    }

    /// Return the underlying field name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }

    pub(crate) fn path(self) -> FieldPath {
        FieldPath::new(self.0)
    }

    // ------------------------------------------------------------------
    // Comparison predicates
    // ------------------------------------------------------------------

    /// Exact-match comparison; a placeholder operand becomes a
    /// cross-field reference.
    #[must_use]
    pub fn eq(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::Eq, value)
    }

    /// Logical negation of the exact-match comparison.
    #[must_use]
    pub fn ne(self, value: impl IntoOperand) -> Predicate {
        self.eq(value).not()
    }

    /// Case-insensitive text equality.
    #[must_use]
    pub fn eq_ci(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::EqCi, value)
    }

    /// Less-than comparison.
    #[must_use]
    pub fn lt(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::Lt, value)
    }

    /// Less-than-or-equal comparison.
    #[must_use]
    pub fn lte(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::Lte, value)
    }

    /// Greater-than comparison.
    #[must_use]
    pub fn gt(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::Gt, value)
    }

    /// Greater-than-or-equal comparison.
    #[must_use]
    pub fn gte(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::Gte, value)
    }

    // ------------------------------------------------------------------
    // Text predicates
    // ------------------------------------------------------------------

    /// Case-sensitive substring match.
    #[must_use]
    pub fn contains(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::Contains, value)
    }

    /// Case-insensitive substring match.
    #[must_use]
    pub fn contains_ci(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::ContainsCi, value)
    }

    /// Case-sensitive prefix match.
    #[must_use]
    pub fn starts_with(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::StartsWith, value)
    }

    /// Case-insensitive prefix match.
    #[must_use]
    pub fn starts_with_ci(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::StartsWithCi, value)
    }

    /// Case-sensitive suffix match.
    #[must_use]
    pub fn ends_with(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::EndsWith, value)
    }

    /// Case-insensitive suffix match.
    #[must_use]
    pub fn ends_with_ci(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::EndsWithCi, value)
    }

    /// Token search: matches when any whitespace-delimited token of the
    /// field's text contains the needle, case-insensitively.
    #[must_use]
    pub fn search(self, value: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::Search, value)
    }

    /// Regular-expression match.
    #[must_use]
    pub fn matches(self, pattern: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::Regex, pattern)
    }

    /// Case-insensitive regular-expression match.
    #[must_use]
    pub fn matches_ci(self, pattern: impl IntoOperand) -> Predicate {
        self.compare(CmpOp::RegexCi, pattern)
    }

    // ------------------------------------------------------------------
    // Set / range predicates
    // ------------------------------------------------------------------

    /// Membership test; each element is resolved individually, so
    /// placeholder elements become cross-field references.
    #[must_use]
    pub fn in_values<I, V>(self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: IntoOperand,
    {
        let items = values
            .into_iter()
            .map(IntoOperand::into_operand)
            .collect::<Vec<_>>();

        self.compare(CmpOp::In, Operand::List(items))
    }

    /// Inclusive-range test; either bound may be a placeholder and is
    /// resolved individually.
    #[must_use]
    pub fn between(self, low: impl IntoOperand, high: impl IntoOperand) -> Predicate {
        let bounds = Operand::List(vec![low.into_operand(), high.into_operand()]);

        self.compare(CmpOp::Between, bounds)
    }

    // ------------------------------------------------------------------
    // Presence predicates
    // ------------------------------------------------------------------

    /// Field holds a truthy value; `!field` is the negation of this.
    #[must_use]
    pub fn truthy(self) -> Predicate {
        self.compare(CmpOp::Truthy, Value::Unit)
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    /// Exponentiation expression over this field.
    #[must_use]
    pub fn pow(self, exp: impl IntoExpr) -> Expr {
        Expr::binary(ArithOp::Pow, self, exp)
    }

    fn compare(self, op: CmpOp, operand: impl IntoOperand) -> Predicate {
        Predicate::Clause(Clause::new(self.path(), op, operand.into_operand()))
    }
}

// ----------------------------------------------------------------------
// Boundary traits
// ----------------------------------------------------------------------

impl AsRef<str> for FieldExpr {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl std::ops::Deref for FieldExpr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl IntoOperand for FieldExpr {
    fn into_operand(self) -> Operand {
        Operand::Field(self.path())
    }
}

impl IntoOperand for &FieldExpr {
    fn into_operand(self) -> Operand {
        Operand::Field(self.path())
    }
}

/// Unary negation asserts the field is falsy or unset.
impl Not for FieldExpr {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        self.truthy().not()
    }
}

impl Not for &FieldExpr {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        (*self).not()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    const FOO: FieldExpr = FieldExpr::new("foo");
    const BAR: FieldExpr = FieldExpr::new("bar");

    #[test]
    fn eq_builds_exact_match_clause() {
        assert_eq!(FOO.eq(1), Predicate::eq("foo", 1));
        assert_eq!(FOO.eq("abc"), Predicate::eq("foo", "abc"));
    }

    #[test]
    fn ne_is_negation_of_the_same_eq_clause() {
        assert_eq!(FOO.ne(1), Predicate::eq("foo", 1).not());
    }

    #[test]
    fn ordering_builders_cover_all_ops() {
        assert_eq!(FOO.gt(1), Predicate::gt("foo", 1));
        assert_eq!(FOO.gte(1), Predicate::gte("foo", 1));
        assert_eq!(FOO.lt(1), Predicate::lt("foo", 1));
        assert_eq!(FOO.lte(1), Predicate::lte("foo", 1));
    }

    #[test]
    fn placeholder_operand_becomes_cross_field_reference() {
        let pred = FOO.gt(&BAR);

        match pred {
            Predicate::Clause(c) => {
                assert_eq!(c.op, CmpOp::Gt);
                assert_eq!(c.operand, Operand::Field(FieldPath::new("bar")));
            }
            _ => panic!("expected Clause"),
        }
    }

    #[test]
    fn in_values_resolves_each_element() {
        let pred = FOO.in_values([1i64.into_operand(), 2i64.into_operand(), BAR.into_operand()]);

        match pred {
            Predicate::Clause(c) => {
                assert_eq!(c.op, CmpOp::In);
                assert_eq!(
                    c.operand,
                    Operand::List(vec![
                        Operand::Value(Value::Int(1)),
                        Operand::Value(Value::Int(2)),
                        Operand::Field(FieldPath::new("bar")),
                    ])
                );
            }
            _ => panic!("expected Clause"),
        }
    }

    #[test]
    fn between_resolves_each_bound() {
        let pred = FOO.between(1, &BAR);

        match pred {
            Predicate::Clause(c) => {
                assert_eq!(c.op, CmpOp::Between);
                assert_eq!(
                    c.operand,
                    Operand::List(vec![
                        Operand::Value(Value::Int(1)),
                        Operand::Field(FieldPath::new("bar")),
                    ])
                );
            }
            _ => panic!("expected Clause"),
        }
    }

    #[test]
    fn unary_not_asserts_falsy() {
        assert_eq!(!FOO, Predicate::truthy("foo").not());
    }

    #[test]
    fn text_builders_tag_their_ops() {
        for (pred, op) in [
            (FOO.eq_ci("A"), CmpOp::EqCi),
            (FOO.contains("A"), CmpOp::Contains),
            (FOO.contains_ci("A"), CmpOp::ContainsCi),
            (FOO.starts_with("A"), CmpOp::StartsWith),
            (FOO.starts_with_ci("A"), CmpOp::StartsWithCi),
            (FOO.ends_with("A"), CmpOp::EndsWith),
            (FOO.ends_with_ci("A"), CmpOp::EndsWithCi),
            (FOO.search("A"), CmpOp::Search),
            (FOO.matches("^A$"), CmpOp::Regex),
            (FOO.matches_ci("^A$"), CmpOp::RegexCi),
        ] {
            match pred {
                Predicate::Clause(c) => assert_eq!(c.op, op),
                _ => panic!("expected Clause"),
            }
        }
    }

    #[test]
    fn field_derefs_to_its_name() {
        assert_eq!(&*FOO, "foo");
        assert_eq!(FOO.name(), "foo");
    }
}
