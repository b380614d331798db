//! Mixin attachment and schema-registration suite.

mod common;

use common::TestModel;
use natq::prelude::*;

struct SoftDeleteMixin;

impl ModelMixin for SoftDeleteMixin {
    const NAME: &'static str = "SoftDeleteMixin";

    fn on_attach(schema: &mut ModelSchema) {
        schema.add_field("deleted_at", FieldKind::Timestamp);
    }
}

struct OwnerMixin;

impl ModelMixin for OwnerMixin {
    const NAME: &'static str = "OwnerMixin";

    fn on_attach(schema: &mut ModelSchema) {
        schema.add_field(
            "owner",
            FieldKind::Relation {
                target: "tests::Player",
            },
        );
    }
}

#[test]
fn mixin_is_added_to_the_schema() {
    let mut schema = TestModel::schema();

    attach_mixin::<SoftDeleteMixin>(&mut schema).expect("first attachment should succeed");

    assert!(schema.has_mixin("SoftDeleteMixin"));
    assert!(schema.field("deleted_at").is_some());
}

#[test]
fn cannot_attach_the_same_mixin_twice() {
    let mut schema = TestModel::schema();

    attach_mixin::<SoftDeleteMixin>(&mut schema).expect("first attachment should succeed");
    let snapshot = schema.clone();

    let err = attach_mixin::<SoftDeleteMixin>(&mut schema)
        .expect_err("second attachment should be rejected");

    assert_eq!(
        err.to_string(),
        "duplicate mixin 'SoftDeleteMixin' on 'tests::TestModel'"
    );
    assert_eq!(schema.fields, snapshot.fields);
    assert_eq!(schema.mixins, snapshot.mixins);
}

#[test]
fn different_mixins_compose_on_one_schema() {
    let mut schema = TestModel::schema();

    attach_mixin::<SoftDeleteMixin>(&mut schema).expect("soft-delete mixin should attach");
    attach_mixin::<OwnerMixin>(&mut schema).expect("owner mixin should attach");

    assert_eq!(schema.mixins, vec!["SoftDeleteMixin", "OwnerMixin"]);
    assert_eq!(
        schema.field("owner").map(|f| &f.kind),
        Some(&FieldKind::Relation {
            target: "tests::Player"
        })
    );
}

#[test]
fn prepared_schema_registers_once() {
    let mut schema = TestModel::schema();
    attach_mixin::<SoftDeleteMixin>(&mut schema).expect("attachment should succeed");

    register_schema(schema.clone()).expect("first registration should succeed");

    let has_mixin = with_schema(TestModel::PATH, |s| s.has_mixin("SoftDeleteMixin"))
        .expect("registered schema should resolve");
    assert!(has_mixin);

    let err = register_schema(schema).expect_err("duplicate registration should fail");
    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert_eq!(err.origin, ErrorOrigin::Schema);
}

#[test]
fn duplicate_mixin_error_converts_into_the_engine_taxonomy() {
    let mut schema = TestModel::schema();
    attach_mixin::<SoftDeleteMixin>(&mut schema).expect("first attachment should succeed");

    let err: InternalError = attach_mixin::<SoftDeleteMixin>(&mut schema)
        .expect_err("second attachment should be rejected")
        .into();

    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert_eq!(err.origin, ErrorOrigin::Schema);
    assert_eq!(
        err.display_with_class(),
        "schema:invariant_violation: duplicate mixin 'SoftDeleteMixin' on 'tests::TestModel'"
    );
}

#[test]
fn mixin_attachment_records_observability() {
    metrics_reset_all();
    let mut schema = TestModel::schema();

    attach_mixin::<SoftDeleteMixin>(&mut schema).expect("attachment should succeed");

    assert_eq!(metrics_report().ops.mixins_attached, 1);
}
