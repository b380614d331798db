use crate::{
    error::InternalError,
    model::{SchemaError, schema::ModelSchema},
};
use std::{cell::RefCell, collections::HashMap};

thread_local! {
    static SCHEMA_REGISTRY: RefCell<SchemaRegistry> = RefCell::new(SchemaRegistry::new());
}

///
/// SchemaRegistry
///
/// Thread-local registry mapping entity path to its prepared schema.
/// Model preparation (mixin attachment, registration) runs here at
/// process start, before concurrent use.
///

#[derive(Default)]
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, ModelSchema>,
}

impl SchemaRegistry {
    /// Create an empty schema registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prepared schema under its entity path.
    pub fn register(&mut self, schema: ModelSchema) -> Result<(), InternalError> {
        if self.schemas.contains_key(schema.path) {
            return Err(SchemaError::SchemaAlreadyRegistered(schema.path.to_string()).into());
        }

        self.schemas.insert(schema.path, schema);
        Ok(())
    }

    /// Look up a schema by path.
    pub fn try_get(&self, path: &str) -> Result<&ModelSchema, InternalError> {
        self.schemas
            .get(path)
            .ok_or_else(|| SchemaError::SchemaNotFound(path.to_string()).into())
    }

    /// Iterate registered schemas.
    pub fn iter(&self) -> impl Iterator<Item = &ModelSchema> {
        self.schemas.values()
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Register a prepared schema in the thread-local registry.
pub fn register_schema(schema: ModelSchema) -> Result<(), InternalError> {
    SCHEMA_REGISTRY.with_borrow_mut(|registry| registry.register(schema))
}

/// Run a closure against a registered schema.
pub fn with_schema<R>(
    path: &str,
    f: impl FnOnce(&ModelSchema) -> R,
) -> Result<R, InternalError> {
    SCHEMA_REGISTRY.with_borrow(|registry| registry.try_get(path).map(f))
}

///
/// TESTS
///
