mod compare;


use crate::{
    traits::FieldValue,
    types::{Date, Float64, Timestamp, Ulid},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextMode {
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// Value
/// the runtime scalar set usable in predicates and expressions
///
/// Null → the field's value is Option::None.
/// Unit → internal placeholder for RHS-less clauses; not a real value.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Date(Date),
    Float64(Float64),
    Int(i64),
    /// Ordered list of values. List order is preserved.
    List(Vec<Self>),
    Null,
    Text(String),
    Timestamp(Timestamp),
    Uint(u64),
    Ulid(Ulid),
    Unit,
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from a list literal.
    ///
    /// Intended for tests and inline construction.
    /// Requires `Clone` because items are borrowed.
    pub fn from_slice<T>(items: &[T]) -> Self
    where
        T: Into<Self> + Clone,
    {
        Self::List(items.iter().cloned().map(Into::into).collect())
    }

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    ///
    /// TYPES
    ///

    /// Returns true if the value is one of the numeric variants
    /// supported by numeric widening.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Float64(_) | Self::Int(_) | Self::Uint(_))
    }

    /// Returns true if the value is Text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    ///
    /// COMPARISON
    ///

    /// Stable canonical rank used by cross-variant ordering surfaces.
    #[must_use]
    pub(crate) const fn canonical_rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Date(_) => 1,
            Self::Float64(_) => 2,
            Self::Int(_) => 3,
            Self::List(_) => 4,
            Self::Null => 5,
            Self::Text(_) => 6,
            Self::Timestamp(_) => 7,
            Self::Uint(_) => 8,
            Self::Ulid(_) => 9,
            Self::Unit => 10,
        }
    }

    /// Total canonical comparator over arbitrary variants.
    #[must_use]
    pub fn canonical_cmp(left: &Self, right: &Self) -> Ordering {
        compare::canonical_cmp(left, right)
    }

    /// Strict comparator for identical orderable variants.
    ///
    /// Returns `None` for mismatched or non-orderable variants.
    #[must_use]
    pub fn strict_order_cmp(left: &Self, right: &Self) -> Option<Ordering> {
        compare::strict_order_cmp(left, right)
    }

    /// Equality under the engine's fixed coercion: numeric variants widen
    /// to a common domain, everything else compares strictly per-variant.
    ///
    /// Returns `None` when the comparison is undefined.
    #[must_use]
    pub fn compare_eq(left: &Self, right: &Self) -> Option<bool> {
        compare::compare_eq(left, right)
    }

    /// Ordering under the engine's fixed coercion; `None` when undefined.
    #[must_use]
    pub fn compare_order(left: &Self, right: &Self) -> Option<Ordering> {
        compare::compare_order(left, right)
    }

    /// Cross-type numeric comparison; returns None if non-numeric.
    #[must_use]
    pub fn cmp_numeric(&self, other: &Self) -> Option<Ordering> {
        compare::cmp_numeric(self, other)
    }

    ///
    /// TRUTHINESS
    ///
    /// Numeric zero, empty text/list, `Null`, and `Unit` are falsy;
    /// every other value is truthy.
    ///

    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Float64(f) => *f != Float64::new(0.0),
            Self::Int(i) => *i != 0,
            Self::Uint(u) => *u != 0,
            Self::List(xs) => !xs.is_empty(),
            Self::Text(s) => !s.is_empty(),
            Self::Null | Self::Unit => false,
            Self::Date(_) | Self::Timestamp(_) | Self::Ulid(_) => true,
        }
    }

    ///
    /// TEXT COMPARISON
    ///

    pub(crate) fn fold_ci(s: &str) -> String {
        if s.is_ascii() {
            return s.to_ascii_lowercase();
        }
        // NOTE: Unicode fallback — to_lowercase stands in for full casefold.
        s.to_lowercase()
    }

    fn text_op(&self, other: &Self, mode: TextMode, f: impl Fn(&str, &str) -> bool) -> Option<bool> {
        let (a, b) = (self.as_text()?, other.as_text()?);

        match mode {
            TextMode::Cs => Some(f(a, b)),
            TextMode::Ci => Some(f(&Self::fold_ci(a), &Self::fold_ci(b))),
        }
    }

    #[must_use]
    /// Case-sensitive/insensitive equality check for text values.
    pub fn text_eq(&self, other: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(other, mode, |a, b| a == b)
    }

    #[must_use]
    /// Check whether `needle` is a substring of `self` under the given text mode.
    pub fn text_contains(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(needle, mode, |a, b| a.contains(b))
    }

    #[must_use]
    /// Check whether `self` starts with `needle` under the given text mode.
    pub fn text_starts_with(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(needle, mode, |a, b| a.starts_with(b))
    }

    #[must_use]
    /// Check whether `self` ends with `needle` under the given text mode.
    pub fn text_ends_with(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(needle, mode, |a, b| a.ends_with(b))
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

#[macro_export]
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool      => Bool,
    Date      => Date,
    Float64   => Float64,
    f64       => Float64,
    i8        => Int,
    i16       => Int,
    i32       => Int,
    i64       => Int,
    &str      => Text,
    String    => Text,
    Timestamp => Timestamp,
    u8        => Uint,
    u16       => Uint,
    u32       => Uint,
    u64       => Uint,
    Ulid      => Ulid,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

// NOTE:
// Value::partial_cmp is NOT the canonical ordering for engine semantics.
// Use canonical_cmp / strict ordering for deterministic total orderings.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Self::strict_order_cmp(self, other)
    }
}
