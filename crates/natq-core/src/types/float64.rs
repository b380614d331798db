use crate::{traits::FieldValue, value::Value};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

///
/// Float64
///
/// Totally-ordered f64 wrapper so `Value` can be `Eq`/`Ord`.
/// -0.0 is canonically stored as 0.0; NaN is canonicalized to a single
/// positive NaN so equality and hashing stay consistent.
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Display, Serialize)]
pub struct Float64(f64);

impl Float64 {
    #[must_use]
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self(f64::NAN);
        }

        // canonicalize -0.0 to 0.0 so Eq/Hash/Ord are consistent
        Self(if v == 0.0 { 0.0 } else { v })
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Eq for Float64 {}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FieldValue for Float64 {
    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Float64 {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<i32> for Float64 {
    fn from(n: i32) -> Self {
        Self(f64::from(n))
    }
}

impl From<Float64> for f64 {
    fn from(x: Float64) -> Self {
        x.0
    }
}

impl<'de> Deserialize<'de> for Float64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_canonicalized() {
        assert_eq!(Float64::new(-0.0), Float64::new(0.0));
        assert!(Float64::new(-0.0).get().is_sign_positive());
    }

    #[test]
    fn nan_is_equal_to_itself_after_canonicalization() {
        let a = Float64::new(f64::NAN);
        let b = Float64::new(-f64::NAN);

        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn total_order_sorts_nan_above_finite() {
        let mut values = vec![
            Float64::new(f64::NAN),
            Float64::new(1.5),
            Float64::new(-2.0),
        ];
        values.sort();

        assert_eq!(values[0], Float64::new(-2.0));
        assert_eq!(values[1], Float64::new(1.5));
        assert!(values[2].get().is_nan());
    }
}
