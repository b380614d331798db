mod field;
mod mixin;
mod schema;

pub mod registry;

pub use field::{FieldKind, FieldModel};
pub use mixin::{ModelMixin, attach_mixin};
pub use schema::ModelSchema;

use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("duplicate mixin '{mixin}' on '{target}'")]
    DuplicateMixin {
        mixin: &'static str,
        target: &'static str,
    },

    #[error("schema '{0}' already registered")]
    SchemaAlreadyRegistered(String),

    #[error("schema '{0}' not found")]
    SchemaNotFound(String),
}

impl SchemaError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateMixin { .. } | Self::SchemaAlreadyRegistered(_) => {
                ErrorClass::InvariantViolation
            }
            Self::SchemaNotFound(_) => ErrorClass::NotFound,
        }
    }
}

impl From<SchemaError> for InternalError {
    fn from(err: SchemaError) -> Self {
        Self::new(err.class(), ErrorOrigin::Schema, err.to_string())
    }
}
