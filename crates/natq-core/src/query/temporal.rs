use crate::query::{
    expr::{ArithOp, Expr, IntoExpr},
    field::FieldExpr,
    operand::{FieldPath, IntoOperand, Operand},
    predicate::{Clause, CmpOp, Predicate},
};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref, sync::OnceLock};

///
/// DatePart
///
/// Named sub-component of a date/time field.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DatePart {
    Year,
    Month,
    Day,
    WeekDay,
    Hour,
    Minute,
    Second,
}

impl DatePart {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::WeekDay => "week_day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// DatePartExpr
///
/// Placeholder for one date/time component of a field. Supports only
/// equality/inequality and arithmetic; the ordering, text, set, and
/// range vocabulary is deliberately absent from the type, so an
/// unsupported operation on a bare component fails at compile time.
///

// NOTE: no PartialEq derive; a trait `eq` candidate on the reference
// would shadow the builder when called through `&DatePartExpr`.
#[derive(Clone, Copy, Debug)]
pub struct DatePartExpr {
    name: &'static str,
    part: DatePart,
}

impl DatePartExpr {
    #[must_use]
    pub const fn new(name: &'static str, part: DatePart) -> Self {
        Self { name, part }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn part(self) -> DatePart {
        self.part
    }

    pub(crate) fn path(self) -> FieldPath {
        FieldPath::with_part(self.name, self.part)
    }

    /// Exact-match comparison on the component; a placeholder operand
    /// becomes a cross-field reference.
    #[must_use]
    pub fn eq(self, value: impl IntoOperand) -> Predicate {
        Predicate::Clause(Clause::new(self.path(), CmpOp::Eq, value.into_operand()))
    }

    /// Logical negation of the exact-match comparison.
    #[must_use]
    pub fn ne(self, value: impl IntoOperand) -> Predicate {
        self.eq(value).not()
    }

    /// Exponentiation expression over the component.
    #[must_use]
    pub fn pow(self, exp: impl IntoExpr) -> Expr {
        Expr::binary(ArithOp::Pow, self, exp)
    }
}

impl IntoOperand for DatePartExpr {
    fn into_operand(self) -> Operand {
        Operand::Field(self.path())
    }
}

impl IntoOperand for &DatePartExpr {
    fn into_operand(self) -> Operand {
        Operand::Field(self.path())
    }
}

impl IntoExpr for DatePartExpr {
    fn into_expr(self) -> Expr {
        Expr::Field(self.path())
    }
}

impl IntoExpr for &DatePartExpr {
    fn into_expr(self) -> Expr {
        Expr::Field(self.path())
    }
}

///
/// DateFieldExpr
///
/// Field placeholder for a date field. Component accessors compute
/// their `DatePartExpr` on first call and cache it per instance, so
/// repeated access returns the identical stored object while distinct
/// fields never share sub-placeholders. Derefs to `FieldExpr` for the
/// full base vocabulary on the field as a whole.
///

#[derive(Debug)]
pub struct DateFieldExpr {
    field: FieldExpr,
    year: OnceLock<DatePartExpr>,
    month: OnceLock<DatePartExpr>,
    day: OnceLock<DatePartExpr>,
    week_day: OnceLock<DatePartExpr>,
}

impl DateFieldExpr {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            field: FieldExpr::new(name),
            year: OnceLock::new(),
            month: OnceLock::new(),
            day: OnceLock::new(),
            week_day: OnceLock::new(),
        }
    }

    pub fn year(&self) -> &DatePartExpr {
        self.year
            .get_or_init(|| DatePartExpr::new(self.field.name(), DatePart::Year))
    }

    pub fn month(&self) -> &DatePartExpr {
        self.month
            .get_or_init(|| DatePartExpr::new(self.field.name(), DatePart::Month))
    }

    pub fn day(&self) -> &DatePartExpr {
        self.day
            .get_or_init(|| DatePartExpr::new(self.field.name(), DatePart::Day))
    }

    pub fn week_day(&self) -> &DatePartExpr {
        self.week_day
            .get_or_init(|| DatePartExpr::new(self.field.name(), DatePart::WeekDay))
    }
}

impl Deref for DateFieldExpr {
    type Target = FieldExpr;

    fn deref(&self) -> &Self::Target {
        &self.field
    }
}

impl IntoOperand for &DateFieldExpr {
    fn into_operand(self) -> Operand {
        Operand::Field(self.field.path())
    }
}

///
/// DateTimeFieldExpr
///
/// Field placeholder for a datetime field; adds the clock components
/// on top of the date components, with the same per-instance caching.
///

#[derive(Debug)]
pub struct DateTimeFieldExpr {
    date: DateFieldExpr,
    hour: OnceLock<DatePartExpr>,
    minute: OnceLock<DatePartExpr>,
    second: OnceLock<DatePartExpr>,
}

impl DateTimeFieldExpr {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            date: DateFieldExpr::new(name),
            hour: OnceLock::new(),
            minute: OnceLock::new(),
            second: OnceLock::new(),
        }
    }

    pub fn hour(&self) -> &DatePartExpr {
        self.hour
            .get_or_init(|| DatePartExpr::new(self.date.name(), DatePart::Hour))
    }

    pub fn minute(&self) -> &DatePartExpr {
        self.minute
            .get_or_init(|| DatePartExpr::new(self.date.name(), DatePart::Minute))
    }

    pub fn second(&self) -> &DatePartExpr {
        self.second
            .get_or_init(|| DatePartExpr::new(self.date.name(), DatePart::Second))
    }
}

impl Deref for DateTimeFieldExpr {
    type Target = DateFieldExpr;

    fn deref(&self) -> &Self::Target {
        &self.date
    }
}

impl IntoOperand for &DateTimeFieldExpr {
    fn into_operand(self) -> Operand {
        Operand::Field(self.date.field.path())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    static CREATED: DateFieldExpr = DateFieldExpr::new("created");
    static SEEN: DateTimeFieldExpr = DateTimeFieldExpr::new("seen");

    #[test]
    fn component_access_is_cached_per_instance() {
        let first = CREATED.year();
        let second = CREATED.year();

        assert!(ptr::eq(first, second));
    }

    #[test]
    fn distinct_instances_do_not_share_components() {
        let a = DateFieldExpr::new("created");
        let b = DateFieldExpr::new("created");

        assert!(!ptr::eq(a.year(), b.year()));
        assert_eq!(a.year().name(), b.year().name());
        assert_eq!(a.year().part(), b.year().part());
    }

    #[test]
    fn component_eq_builds_part_scoped_clause() {
        let pred = CREATED.year().eq(2024);

        match pred {
            Predicate::Clause(c) => {
                assert_eq!(c.path, FieldPath::with_part("created", DatePart::Year));
                assert_eq!(c.op, CmpOp::Eq);
            }
            _ => panic!("expected Clause"),
        }
    }

    #[test]
    fn component_ne_is_negation_of_eq() {
        assert_eq!(
            CREATED.month().ne(6),
            CREATED.month().eq(6).not()
        );
    }

    #[test]
    fn datetime_exposes_clock_components() {
        for (expr, part) in [
            (SEEN.hour(), DatePart::Hour),
            (SEEN.minute(), DatePart::Minute),
            (SEEN.second(), DatePart::Second),
        ] {
            assert_eq!(expr.part(), part);
            assert_eq!(expr.name(), "seen");
        }
    }

    #[test]
    fn datetime_derefs_to_date_components() {
        assert_eq!(SEEN.year().part(), DatePart::Year);
        assert_eq!(SEEN.week_day().part(), DatePart::WeekDay);
    }

    #[test]
    fn whole_field_vocabulary_reaches_through_deref() {
        // The field as a whole still supports ordering.
        let pred = CREATED.gt(crate::types::Date::new(2024, 1, 1));

        match pred {
            Predicate::Clause(c) => {
                assert_eq!(c.path, FieldPath::new("created"));
                assert_eq!(c.op, CmpOp::Gt);
            }
            _ => panic!("expected Clause"),
        }
    }

    #[test]
    fn component_arithmetic_builds_part_scoped_expression() {
        let expr = *CREATED.year() + 1;

        assert_eq!(
            expr,
            Expr::Binary {
                op: ArithOp::Add,
                lhs: Box::new(Expr::Field(FieldPath::with_part("created", DatePart::Year))),
                rhs: Box::new(Expr::Literal(crate::value::Value::Int(1))),
            }
        );
    }

    #[test]
    fn reflected_component_arithmetic_preserves_order() {
        let expr = 3000 - CREATED.year();

        assert_eq!(
            expr,
            Expr::Binary {
                op: ArithOp::Sub,
                lhs: Box::new(Expr::Literal(crate::value::Value::Int(3000))),
                rhs: Box::new(Expr::Field(FieldPath::with_part("created", DatePart::Year))),
            }
        );
    }
}
