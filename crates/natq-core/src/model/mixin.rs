use crate::{
    model::{SchemaError, schema::ModelSchema},
    obs::sink::{MetricsEvent, record},
};

///
/// ModelMixin
///
/// A capability composed into an entity schema at model-preparation
/// time. `NAME` is the marker recorded on the target; `on_attach`
/// merges the mixin's declared fields and behavior into the schema.
///

pub trait ModelMixin {
    const NAME: &'static str;

    fn on_attach(schema: &mut ModelSchema);
}

///
/// Attach a mixin to a schema exactly once.
///
/// On success the marker is appended to the schema's mixin list and the
/// hook runs once, receiving the target. Attaching the same mixin twice
/// fails with `DuplicateMixin`, the hook does not run, and the schema
/// is left untouched. Different mixins may be attached to the same
/// schema in any order; attachment never affects other schemas.
///
/// Duplicate detection inspects only this schema's own mixin list.
///
pub fn attach_mixin<M: ModelMixin>(schema: &mut ModelSchema) -> Result<(), SchemaError> {
    if schema.has_mixin(M::NAME) {
        return Err(SchemaError::DuplicateMixin {
            mixin: M::NAME,
            target: schema.path,
        });
    }

    schema.mixins.push(M::NAME);
    M::on_attach(schema);

    record(MetricsEvent::MixinAttached {
        target_path: schema.path,
    });

    Ok(())
}

///
/// TESTS
///
