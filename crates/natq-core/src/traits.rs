use crate::{model::ModelSchema, types::Ulid, value::Value};

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================
//
// These traits define *where* something lives in the system,
// not what data it contains.
//

///
/// Path
/// Fully-qualified schema path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EntityKind
///
/// A schema-backed entity type. `schema()` builds the runtime model
/// that mixin attachment and registration operate on.
///

pub trait EntityKind: Path {
    fn schema() -> ModelSchema;
}

///
/// EntityIdentity
///
/// Primary-key access for entity instances. Every entity is keyed by
/// a ULID stored in its `id` field.
///

pub trait EntityIdentity {
    fn id(&self) -> Ulid;
    fn set_id(&mut self, id: Ulid);
}

// ============================================================================
// VALUE BOUNDARIES
// ============================================================================

///
/// FieldValue
///
/// Conversion boundary for scalars used in query predicates.
///
/// Represents values that can appear on the *right-hand side* of predicates.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }

    fn from_value(_value: &Value) -> Option<Self> {
        None
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if matches!(value, Value::Null) {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        let mut out = Self::with_capacity(items.len());
        for item in items {
            out.push(T::from_value(item)?);
        }

        Some(out)
    }
}

// impl_field_value
#[macro_export]
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    bool => Bool,
    f64 => Float64,
);

///
/// FieldValues
///
/// Row-side field access by name. The standard runtime entity interface
/// used by predicate and expression evaluation.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// FieldWrite
///
/// Store-side write-back used by expression-applied updates.
/// Returns false when the field is unknown or the value does not fit
/// the field's type; the caller counts such rows as skipped.
///

pub trait FieldWrite {
    fn set_value(&mut self, field: &str, value: &Value) -> bool;
}
