///
/// FieldModel
/// Runtime field metadata used by schema checks and diagnostics.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Field name as used in predicates.
    pub name: &'static str,
    /// Runtime type shape.
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

///
/// FieldKind
///
/// Minimal type surface aligned with `Value` variants; a lossy
/// projection of the entity's Rust types.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Date,
    Float64,
    Int,
    List(Box<Self>),
    Text,
    Timestamp,
    Uint,
    Ulid,

    /// To-one relation storing the target row's identity.
    Relation { target: &'static str },

    /// Marker for fields that are not filterable.
    Unsupported,
}
