use crate::{
    query::temporal::DatePart,
    traits::FieldValue,
    types::{Date, Float64, Timestamp, Ulid},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// FieldPath
///
/// A clause's left-hand side: a field name plus an optional date-part
/// selector. Built from placeholders at clause-construction time.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldPath {
    pub name: String,
    pub part: Option<DatePart>,
}

impl FieldPath {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            part: None,
        }
    }

    pub fn with_part(name: impl Into<String>, part: DatePart) -> Self {
        Self {
            name: name.into(),
            part: Some(part),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.part {
            Some(part) => write!(f, "{}.{part}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

///
/// Operand
///
/// A clause's right-hand side: a plain value, a cross-field reference,
/// or a list of operands (membership and range clauses).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Operand {
    Value(Value),
    Field(FieldPath),
    List(Vec<Self>),
}

///
/// IntoOperand
///
/// The uniform operand-resolution rule: a field placeholder passed where
/// a value is expected becomes a cross-field reference, never an opaque
/// value. Scalars convert through `FieldValue::to_value`. Every builder
/// that accepts user operands goes through this trait, including each
/// element of `in_values` and each bound of `between`.
///

pub trait IntoOperand {
    fn into_operand(self) -> Operand;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> Operand {
        self
    }
}

impl<T: IntoOperand> IntoOperand for Vec<T> {
    fn into_operand(self) -> Operand {
        Operand::List(self.into_iter().map(IntoOperand::into_operand).collect())
    }
}

// impl_operand_value
macro_rules! impl_operand_value {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl IntoOperand for $type {
                fn into_operand(self) -> Operand {
                    Operand::Value(self.to_value())
                }
            }
        )*
    };
}

impl_operand_value!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, f64, &str, String, Date, Float64, Timestamp, Ulid,
    Value,
);
