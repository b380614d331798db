use crate::{
    query::{
        operand::{FieldPath, Operand},
        predicate::{Clause, CmpOp, Predicate},
        temporal::DatePart,
    },
    traits::FieldValues,
    value::{TextMode, Value},
};
use regex::RegexBuilder;
use std::cmp::Ordering;

///
/// FieldPresence
///
/// Result of attempting to read a field from a row during predicate
/// evaluation. This distinguishes between a missing field and a
/// present field whose value may be `Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence {
    /// Field exists and has a value (including `Value::Null`).
    Present(Value),
    /// Field is not present on the row.
    Missing,
}

///
/// Row
///
/// Abstraction over a row-like value that can expose fields by name.
/// This decouples predicate evaluation from concrete entity types.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence;
}

///
/// Default `Row` implementation for any type that exposes
/// `FieldValues`, which is the standard runtime entity interface.
///

impl<T: FieldValues> Row for T {
    fn field(&self, name: &str) -> FieldPresence {
        match self.get_value(name) {
            Some(value) => FieldPresence::Present(value),
            None => FieldPresence::Missing,
        }
    }
}

/// Read a field path from a row, applying the date-part selector when
/// one is present. A part selector over a non-temporal value reads as
/// missing.
pub(crate) fn read_path<R: Row + ?Sized>(row: &R, path: &FieldPath) -> FieldPresence {
    match row.field(&path.name) {
        FieldPresence::Present(value) => match path.part {
            None => FieldPresence::Present(value),
            Some(part) => match extract_part(&value, part) {
                Some(n) => FieldPresence::Present(Value::Int(n)),
                None => FieldPresence::Missing,
            },
        },
        FieldPresence::Missing => FieldPresence::Missing,
    }
}

///
/// Evaluate a predicate against a single row.
///
/// This function performs **pure runtime evaluation**:
/// - no schema access
/// - no validation
///
/// Any unsupported comparison simply evaluates to `false`; a missing
/// field never matches a positive clause (and therefore does match a
/// negated truthiness clause).
///
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,

        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
        Predicate::Not(inner) => !eval(row, inner),

        Predicate::Clause(clause) => eval_clause(row, clause),
    }
}

///
/// Evaluate a single comparison clause against a row.
///
/// Returns `false` if:
/// - the field (or its date part) is missing
/// - an operand's cross-field reference cannot be read
/// - the comparison is not defined for the value pair
///
fn eval_clause<R: Row + ?Sized>(row: &R, clause: &Clause) -> bool {
    let FieldPresence::Present(actual) = read_path(row, &clause.path) else {
        return false;
    };

    // NOTE: comparison helpers return None when a comparison is invalid;
    // eval treats that as false.
    match clause.op {
        CmpOp::Truthy => actual.is_truthy(),

        CmpOp::Eq => resolve(row, &clause.operand)
            .and_then(|rhs| Value::compare_eq(&actual, &rhs))
            .unwrap_or(false),

        CmpOp::Lt => cmp_resolved(row, &actual, &clause.operand).is_some_and(Ordering::is_lt),
        CmpOp::Lte => cmp_resolved(row, &actual, &clause.operand).is_some_and(Ordering::is_le),
        CmpOp::Gt => cmp_resolved(row, &actual, &clause.operand).is_some_and(Ordering::is_gt),
        CmpOp::Gte => cmp_resolved(row, &actual, &clause.operand).is_some_and(Ordering::is_ge),

        CmpOp::In => in_list(row, &actual, &clause.operand),
        CmpOp::Between => between(row, &actual, &clause.operand),

        CmpOp::EqCi => text_resolved(row, &actual, &clause.operand, |a, b| {
            a.text_eq(b, TextMode::Ci)
        }),
        CmpOp::Contains => text_resolved(row, &actual, &clause.operand, |a, b| {
            a.text_contains(b, TextMode::Cs)
        }),
        CmpOp::ContainsCi => text_resolved(row, &actual, &clause.operand, |a, b| {
            a.text_contains(b, TextMode::Ci)
        }),
        CmpOp::StartsWith => text_resolved(row, &actual, &clause.operand, |a, b| {
            a.text_starts_with(b, TextMode::Cs)
        }),
        CmpOp::StartsWithCi => text_resolved(row, &actual, &clause.operand, |a, b| {
            a.text_starts_with(b, TextMode::Ci)
        }),
        CmpOp::EndsWith => text_resolved(row, &actual, &clause.operand, |a, b| {
            a.text_ends_with(b, TextMode::Cs)
        }),
        CmpOp::EndsWithCi => text_resolved(row, &actual, &clause.operand, |a, b| {
            a.text_ends_with(b, TextMode::Ci)
        }),

        CmpOp::Search => text_resolved(row, &actual, &clause.operand, |a, b| {
            Some(search_match(a.as_text()?, b.as_text()?))
        }),

        CmpOp::Regex => regex_resolved(row, &actual, &clause.operand, false),
        CmpOp::RegexCi => regex_resolved(row, &actual, &clause.operand, true),
    }
}

/// Resolve an operand to a concrete value against the row.
///
/// Cross-field references read the referenced field (including date
/// parts) from the same row; an unreadable reference resolves to
/// `None` and the enclosing comparison is a non-match.
fn resolve<R: Row + ?Sized>(row: &R, operand: &Operand) -> Option<Value> {
    match operand {
        Operand::Value(value) => Some(value.clone()),
        Operand::Field(path) => match read_path(row, path) {
            FieldPresence::Present(value) => Some(value),
            FieldPresence::Missing => None,
        },
        // Lists are consumed element-wise by In/Between.
        Operand::List(_) => None,
    }
}

fn cmp_resolved<R: Row + ?Sized>(
    row: &R,
    actual: &Value,
    operand: &Operand,
) -> Option<Ordering> {
    let rhs = resolve(row, operand)?;

    Value::compare_order(actual, &rhs)
}

fn text_resolved<R: Row + ?Sized>(
    row: &R,
    actual: &Value,
    operand: &Operand,
    f: impl FnOnce(&Value, &Value) -> Option<bool>,
) -> bool {
    resolve(row, operand)
        .and_then(|rhs| f(actual, &rhs))
        .unwrap_or(false)
}

///
/// Check whether the actual value equals any element of the operand
/// list. Each element is resolved individually, so placeholder elements
/// compare against the referenced field's current value.
///
fn in_list<R: Row + ?Sized>(row: &R, actual: &Value, operand: &Operand) -> bool {
    let Operand::List(items) = operand else {
        return false;
    };

    items.iter().any(|item| {
        resolve(row, item)
            .and_then(|rhs| Value::compare_eq(actual, &rhs))
            .unwrap_or(false)
    })
}

///
/// Inclusive-range check: `low <= actual <= high`. Bounds resolve
/// individually; an unreadable or incomparable bound is a non-match.
///
fn between<R: Row + ?Sized>(row: &R, actual: &Value, operand: &Operand) -> bool {
    let Operand::List(bounds) = operand else {
        return false;
    };
    let [low, high] = bounds.as_slice() else {
        return false;
    };

    let low_ok = resolve(row, low)
        .and_then(|rhs| Value::compare_order(actual, &rhs))
        .is_some_and(Ordering::is_ge);
    let high_ok = resolve(row, high)
        .and_then(|rhs| Value::compare_order(actual, &rhs))
        .is_some_and(Ordering::is_le);

    low_ok && high_ok
}

///
/// Token search: any whitespace-delimited token of the haystack
/// casefold-contains the needle.
///
fn search_match(hay: &str, needle: &str) -> bool {
    let needle = Value::fold_ci(needle);

    hay.split_whitespace()
        .any(|token| Value::fold_ci(token).contains(&needle))
}

fn regex_resolved<R: Row + ?Sized>(
    row: &R,
    actual: &Value,
    operand: &Operand,
    case_insensitive: bool,
) -> bool {
    let Some(hay) = actual.as_text() else {
        return false;
    };
    let Some(pattern) = resolve(row, operand) else {
        return false;
    };
    let Some(pattern) = pattern.as_text().map(ToOwned::to_owned) else {
        return false;
    };

    // NOTE: invalid patterns are non-matches, never errors.
    RegexBuilder::new(&pattern)
        .case_insensitive(case_insensitive)
        .build()
        .is_ok_and(|re| re.is_match(hay))
}

/// Extract a date/time component as an integer for comparison.
fn extract_part(value: &Value, part: DatePart) -> Option<i64> {
    match value {
        Value::Date(date) => match part {
            DatePart::Year => Some(i64::from(date.year())),
            DatePart::Month => Some(i64::from(date.month())),
            DatePart::Day => Some(i64::from(date.day())),
            DatePart::WeekDay => Some(i64::from(date.week_day())),
            // Clock components do not exist on a date-only value.
            DatePart::Hour | DatePart::Minute | DatePart::Second => None,
        },
        Value::Timestamp(ts) => match part {
            DatePart::Year => Some(i64::from(ts.year())),
            DatePart::Month => Some(i64::from(ts.month())),
            DatePart::Day => Some(i64::from(ts.day())),
            DatePart::WeekDay => Some(i64::from(ts.week_day())),
            DatePart::Hour => Some(i64::from(ts.hour())),
            DatePart::Minute => Some(i64::from(ts.minute())),
            DatePart::Second => Some(i64::from(ts.second())),
        },
        _ => None,
    }
}

///
/// TESTS
///
