use crate::{
    query::{
        eval::{self, FieldPresence, Row},
        field::FieldExpr,
        operand::FieldPath,
        temporal::DatePartExpr,
    },
    traits::FieldValue,
    types::{Date, Float64, Timestamp, Ulid},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Rem, Sub};

///
/// Expression AST
///
/// Arithmetic combinations of field paths and literal values, produced
/// by operator application on placeholders and consumed by
/// expression-applied updates or evaluated directly against a row.
///

///
/// ArithOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

///
/// Expr
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Expr {
    Field(FieldPath),
    Literal(Value),
    Binary {
        op: ArithOp,
        lhs: Box<Self>,
        rhs: Box<Self>,
    },
}

impl Expr {
    /// Reference a field (or date part) of the evaluated row.
    #[must_use]
    pub const fn field(path: FieldPath) -> Self {
        Self::Field(path)
    }

    /// Embed a literal value.
    #[must_use]
    pub fn literal(value: impl FieldValue) -> Self {
        Self::Literal(value.to_value())
    }

    /// Combine two sub-expressions; operand order is preserved exactly
    /// as given, so reflected forms stay order-correct.
    #[must_use]
    pub fn binary(op: ArithOp, lhs: impl IntoExpr, rhs: impl IntoExpr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs.into_expr()),
            rhs: Box::new(rhs.into_expr()),
        }
    }

    /// Exponentiation; named because Rust has no `**` operator.
    #[must_use]
    pub fn pow(self, exp: impl IntoExpr) -> Self {
        Self::binary(ArithOp::Pow, self, exp)
    }

    /// Evaluate against a row with numeric widening.
    ///
    /// Returns `None` when a referenced field is missing, an operand is
    /// non-numeric, or the arithmetic itself is undefined (division by
    /// zero, overflow, non-finite float results).
    #[must_use]
    pub fn eval<R: Row + ?Sized>(&self, row: &R) -> Option<Value> {
        match self {
            Self::Field(path) => match eval::read_path(row, path) {
                FieldPresence::Present(value) => Some(value),
                FieldPresence::Missing => None,
            },
            Self::Literal(value) => Some(value.clone()),
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.eval(row)?;
                let rhs = rhs.eval(row)?;

                eval_binary(*op, &lhs, &rhs)
            }
        }
    }
}

///
/// IntoExpr
///
/// Conversion into an expression node: placeholders become field
/// references, scalars become literals. The expression-side counterpart
/// of the operand-resolution rule.
///

pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for FieldExpr {
    fn into_expr(self) -> Expr {
        Expr::Field(self.path())
    }
}

impl IntoExpr for &FieldExpr {
    fn into_expr(self) -> Expr {
        Expr::Field(self.path())
    }
}

// impl_expr_literal
macro_rules! impl_expr_literal {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl IntoExpr for $type {
                fn into_expr(self) -> Expr {
                    Expr::Literal(self.to_value())
                }
            }
        )*
    };
}

impl_expr_literal!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, f64, &str, String, Date, Float64, Timestamp, Ulid,
    Value,
);

// ----------------------------------------------------------------------
// Operators
// ----------------------------------------------------------------------

// Forward forms: placeholder/expression on the left-hand side.
macro_rules! impl_arith_ops {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl<T: IntoExpr> Add<T> for $type {
                type Output = Expr;

                fn add(self, rhs: T) -> Expr {
                    Expr::binary(ArithOp::Add, self, rhs)
                }
            }

            impl<T: IntoExpr> Sub<T> for $type {
                type Output = Expr;

                fn sub(self, rhs: T) -> Expr {
                    Expr::binary(ArithOp::Sub, self, rhs)
                }
            }

            impl<T: IntoExpr> Mul<T> for $type {
                type Output = Expr;

                fn mul(self, rhs: T) -> Expr {
                    Expr::binary(ArithOp::Mul, self, rhs)
                }
            }

            impl<T: IntoExpr> Div<T> for $type {
                type Output = Expr;

                fn div(self, rhs: T) -> Expr {
                    Expr::binary(ArithOp::Div, self, rhs)
                }
            }

            impl<T: IntoExpr> Rem<T> for $type {
                type Output = Expr;

                fn rem(self, rhs: T) -> Expr {
                    Expr::binary(ArithOp::Rem, self, rhs)
                }
            }
        )*
    };
}

impl_arith_ops!(Expr, FieldExpr, DatePartExpr, &DatePartExpr);

// Reflected forms: numeric primitive on the left-hand side. Each impl
// keeps the written operand order, so `5 - field` computes five minus
// the field and never the reverse.
macro_rules! impl_reflected_rhs {
    ( $lhs:ty => $( $rhs:ty ),* $(,)? ) => {
        $(
            impl Add<$rhs> for $lhs {
                type Output = Expr;

                fn add(self, rhs: $rhs) -> Expr {
                    Expr::binary(ArithOp::Add, self, rhs)
                }
            }

            impl Sub<$rhs> for $lhs {
                type Output = Expr;

                fn sub(self, rhs: $rhs) -> Expr {
                    Expr::binary(ArithOp::Sub, self, rhs)
                }
            }

            impl Mul<$rhs> for $lhs {
                type Output = Expr;

                fn mul(self, rhs: $rhs) -> Expr {
                    Expr::binary(ArithOp::Mul, self, rhs)
                }
            }

            impl Div<$rhs> for $lhs {
                type Output = Expr;

                fn div(self, rhs: $rhs) -> Expr {
                    Expr::binary(ArithOp::Div, self, rhs)
                }
            }

            impl Rem<$rhs> for $lhs {
                type Output = Expr;

                fn rem(self, rhs: $rhs) -> Expr {
                    Expr::binary(ArithOp::Rem, self, rhs)
                }
            }
        )*
    };
}

macro_rules! impl_reflected_ops {
    ( $( $lhs:ty ),* $(,)? ) => {
        $(
            impl_reflected_rhs!($lhs => Expr, FieldExpr, DatePartExpr, &DatePartExpr);
        )*
    };
}

impl_reflected_ops!(i32, i64, u32, u64, f64);

// ----------------------------------------------------------------------
// Arithmetic semantics
// ----------------------------------------------------------------------

enum Num {
    Int(i128),
    Float(f64),
}

fn num(value: &Value) -> Option<Num> {
    match value {
        Value::Float64(f) => Some(Num::Float(f.get())),
        Value::Int(i) => Some(Num::Int(i128::from(*i))),
        Value::Uint(u) => Some(Num::Int(i128::from(*u))),
        _ => None,
    }
}

fn eval_binary(op: ArithOp, lhs: &Value, rhs: &Value) -> Option<Value> {
    match (num(lhs)?, num(rhs)?) {
        (Num::Int(a), Num::Int(b)) => int_arith(op, a, b).and_then(|n| narrow_int(n, lhs, rhs)),
        (a, b) => float_arith(op, as_f64(a), as_f64(b)),
    }
}

#[expect(clippy::cast_precision_loss)]
const fn as_f64(n: Num) -> f64 {
    match n {
        Num::Int(i) => i as f64,
        Num::Float(f) => f,
    }
}

fn int_arith(op: ArithOp, a: i128, b: i128) -> Option<i128> {
    match op {
        ArithOp::Add => a.checked_add(b),
        ArithOp::Sub => a.checked_sub(b),
        ArithOp::Mul => a.checked_mul(b),
        ArithOp::Div => a.checked_div(b),
        ArithOp::Rem => a.checked_rem(b),
        ArithOp::Pow => u32::try_from(b).ok().and_then(|exp| a.checked_pow(exp)),
    }
}

// Unsigned pairs stay unsigned; any signed operand narrows to Int.
fn narrow_int(n: i128, lhs: &Value, rhs: &Value) -> Option<Value> {
    if matches!(lhs, Value::Uint(_)) && matches!(rhs, Value::Uint(_)) {
        u64::try_from(n).ok().map(Value::Uint)
    } else {
        i64::try_from(n).ok().map(Value::Int)
    }
}

fn float_arith(op: ArithOp, a: f64, b: f64) -> Option<Value> {
    let out = match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => a / b,
        ArithOp::Rem => a % b,
        ArithOp::Pow => a.powf(b),
    };

    out.is_finite().then(|| Value::Float64(Float64::new(out)))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FieldValues;
    use std::collections::BTreeMap;

    const FOO: FieldExpr = FieldExpr::new("foo");
    const BAR: FieldExpr = FieldExpr::new("bar");

    struct TestRow(BTreeMap<&'static str, Value>);

    impl FieldValues for TestRow {
        fn get_value(&self, field: &str) -> Option<Value> {
            self.0.get(field).cloned()
        }
    }

    fn row(foo: i64, bar: i64) -> TestRow {
        TestRow(BTreeMap::from([
            ("foo", Value::Int(foo)),
            ("bar", Value::Int(bar)),
        ]))
    }

    #[test]
    fn field_plus_literal_builds_binary_node() {
        let expr = FOO + 10;

        assert_eq!(
            expr,
            Expr::Binary {
                op: ArithOp::Add,
                lhs: Box::new(Expr::Field(FieldPath::new("foo"))),
                rhs: Box::new(Expr::Literal(Value::Int(10))),
            }
        );
    }

    #[test]
    fn reflected_sub_preserves_operand_order() {
        let expr = 5i64 - FOO;

        assert_eq!(
            expr,
            Expr::Binary {
                op: ArithOp::Sub,
                lhs: Box::new(Expr::Literal(Value::Int(5))),
                rhs: Box::new(Expr::Field(FieldPath::new("foo"))),
            }
        );

        // 5 - 2 = 3, never 2 - 5
        assert_eq!(expr.eval(&row(2, 0)), Some(Value::Int(3)));
    }

    #[test]
    fn reflected_div_and_rem_preserve_operand_order() {
        assert_eq!((10i64 / FOO).eval(&row(2, 0)), Some(Value::Int(5)));
        assert_eq!((7i64 % FOO).eval(&row(4, 0)), Some(Value::Int(3)));
    }

    #[test]
    fn chained_expressions_evaluate_inside_out() {
        let expr = (FOO + BAR) * 2;

        assert_eq!(expr.eval(&row(3, 4)), Some(Value::Int(14)));
    }

    #[test]
    fn cross_field_arithmetic_reads_both_fields() {
        let expr = FOO - BAR;

        assert_eq!(expr.eval(&row(10, 4)), Some(Value::Int(6)));
    }

    #[test]
    fn pow_is_a_named_method() {
        assert_eq!(FOO.pow(3).eval(&row(2, 0)), Some(Value::Int(8)));
        assert_eq!((FOO + 1).pow(2).eval(&row(2, 0)), Some(Value::Int(9)));
    }

    #[test]
    fn division_by_zero_is_undefined() {
        assert_eq!((FOO / 0).eval(&row(1, 0)), None);
        assert_eq!((FOO % 0).eval(&row(1, 0)), None);
    }

    #[test]
    fn overflow_is_undefined() {
        let expr = FOO * 2;
        let r = row(i64::MAX, 0);

        assert_eq!(expr.eval(&r), None);
    }

    #[test]
    fn missing_field_is_undefined() {
        let expr = FieldExpr::new("nope") + 1;

        assert_eq!(expr.eval(&row(1, 2)), None);
    }

    #[test]
    fn non_numeric_operand_is_undefined() {
        let r = TestRow(BTreeMap::from([("foo", Value::Text("x".into()))]));

        assert_eq!((FOO + 1).eval(&r), None);
    }

    #[test]
    fn floats_widen_integer_operands() {
        let expr = FOO + 0.5;

        assert_eq!(
            expr.eval(&row(2, 0)),
            Some(Value::Float64(Float64::new(2.5)))
        );
    }

    #[test]
    fn unsigned_pairs_stay_unsigned() {
        let r = TestRow(BTreeMap::from([("foo", Value::Uint(10))]));

        assert_eq!((FOO + 1u64).eval(&r), Some(Value::Uint(11)));
        // Underflow cannot narrow back into the unsigned domain.
        assert_eq!((FOO - 11u64).eval(&r), None);
    }
}
