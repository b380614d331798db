//! ## Crate layout
//! - `error`: classified runtime error taxonomy.
//! - `model`: runtime model schemas, mixin attachment, and the schema registry.
//! - `obs`: runtime telemetry (metrics) and sink abstractions.
//! - `query`: field placeholders, predicate/expression ASTs, and row evaluation.
//! - `traits`: value and entity boundary contracts.
//! - `types`: scalar domain types (`Date`, `Timestamp`, `Float64`, `Ulid`).
//! - `value`: the runtime scalar `Value` and its comparison semantics.
//!
//! The `prelude` module mirrors the surface used by calling code.

pub mod error;
pub mod model;
pub mod obs;
pub mod query;
pub mod traits;
pub mod types;
pub mod value;

pub use error::{ErrorClass, ErrorOrigin, InternalError};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        error::{ErrorClass, ErrorOrigin, InternalError},
        model::{
            FieldKind, FieldModel, ModelMixin, ModelSchema, SchemaError, attach_mixin,
            registry::{register_schema, with_schema},
        },
        obs::{metrics_report, metrics_reset_all},
        query::{
            ArithOp, Clause, CmpOp, DateFieldExpr, DatePart, DatePartExpr, DateTimeFieldExpr,
            Expr, FieldExpr, FieldPath, IntoExpr as _, IntoOperand as _, Operand, PkFieldExpr,
            Predicate, RelationFieldExpr,
            eval::{FieldPresence, Row, eval},
        },
        traits::{EntityIdentity, EntityKind, FieldValue, FieldValues, FieldWrite, Path},
        types::{Date, Float64, Timestamp, Ulid},
        value::Value,
    };
    pub use serde::{Deserialize, Serialize};
}
