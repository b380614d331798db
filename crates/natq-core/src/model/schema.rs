use crate::model::field::{FieldKind, FieldModel};

///
/// ModelSchema
///
/// Owned runtime model for one entity. Built at process start by the
/// entity's `schema()` hook, then extended by model preparation (mixin
/// attachment) before registration.
///

#[derive(Clone, Debug)]
pub struct ModelSchema {
    /// Fully-qualified Rust type path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Stable external name.
    pub entity_name: &'static str,
    /// Primary key field (always present in `fields`).
    pub primary_key: &'static str,
    /// Ordered field list.
    pub fields: Vec<FieldModel>,
    /// Ordered list of attached mixin markers; at most one per mixin.
    pub mixins: Vec<&'static str>,
}

impl ModelSchema {
    /// Build a schema seeded with the identity field.
    #[must_use]
    pub fn new(path: &'static str, entity_name: &'static str) -> Self {
        Self {
            path,
            entity_name,
            primary_key: "id",
            fields: vec![FieldModel::new("id", FieldKind::Ulid)],
            mixins: Vec::new(),
        }
    }

    /// Append a field (builder-style).
    #[must_use]
    pub fn with_field(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.add_field(name, kind);
        self
    }

    /// Append a field in place; mixin hooks use this to merge their
    /// declared fields into the target.
    pub fn add_field(&mut self, name: &'static str, kind: FieldKind) {
        self.fields.push(FieldModel::new(name, kind));
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the given mixin marker has been attached.
    #[must_use]
    pub fn has_mixin(&self, name: &str) -> bool {
        self.mixins.contains(&name)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_schema_carries_the_identity_field() {
        let schema = ModelSchema::new("app::TestModel", "test_model");

        assert_eq!(schema.primary_key, "id");
        assert_eq!(
            schema.field("id"),
            Some(&FieldModel::new("id", FieldKind::Ulid))
        );
        assert!(schema.mixins.is_empty());
    }

    #[test]
    fn with_field_appends_in_order() {
        let schema = ModelSchema::new("app::TestModel", "test_model")
            .with_field("foo", FieldKind::Int)
            .with_field("name", FieldKind::Text);

        let names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "foo", "name"]);
    }

    #[test]
    fn field_lookup_misses_unknown_names() {
        let schema = ModelSchema::new("app::TestModel", "test_model");

        assert!(schema.field("nope").is_none());
    }
}
