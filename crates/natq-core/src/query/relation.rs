use crate::{
    query::{
        field::FieldExpr,
        operand::{IntoOperand, Operand},
        predicate::Predicate,
    },
    traits::EntityIdentity,
};
use std::ops::Deref;

///
/// RelationFieldExpr
///
/// Placeholder for a to-one relation field storing the target row's
/// identity. Extends the base field vocabulary without altering it and
/// records the target entity path for diagnostics and schema checks.
///

// NOTE: no PartialEq derive; a trait `eq` candidate on the reference
// would shadow the deref'd builder vocabulary.
#[derive(Clone, Copy, Debug)]
pub struct RelationFieldExpr {
    field: FieldExpr,
    target: &'static str,
}

impl RelationFieldExpr {
    #[must_use]
    pub const fn new(name: &'static str, target: &'static str) -> Self {
        Self {
            field: FieldExpr::new(name),
            target,
        }
    }

    /// Path of the entity this relation points at.
    #[must_use]
    pub const fn target_path(self) -> &'static str {
        self.target
    }

    /// Match rows whose relation points at the given entity instance.
    #[must_use]
    pub fn references(self, entity: &impl EntityIdentity) -> Predicate {
        self.field.eq(entity.id())
    }
}

impl Deref for RelationFieldExpr {
    type Target = FieldExpr;

    fn deref(&self) -> &Self::Target {
        &self.field
    }
}

impl IntoOperand for RelationFieldExpr {
    fn into_operand(self) -> Operand {
        self.field.into_operand()
    }
}

impl IntoOperand for &RelationFieldExpr {
    fn into_operand(self) -> Operand {
        self.field.into_operand()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        query::{operand::FieldPath, predicate::CmpOp},
        types::Ulid,
        value::Value,
    };

    const OWNER: RelationFieldExpr = RelationFieldExpr::new("owner", "app::Player");

    struct Target {
        id: Ulid,
    }

    impl EntityIdentity for Target {
        fn id(&self) -> Ulid {
            self.id
        }

        fn set_id(&mut self, id: Ulid) {
            self.id = id;
        }
    }

    #[test]
    fn records_the_target_entity_path() {
        assert_eq!(OWNER.target_path(), "app::Player");
    }

    #[test]
    fn references_matches_on_the_target_identity() {
        let target = Target {
            id: Ulid::generate(),
        };
        let pred = OWNER.references(&target);

        match pred {
            Predicate::Clause(c) => {
                assert_eq!(c.path, FieldPath::new("owner"));
                assert_eq!(c.op, CmpOp::Eq);
                assert_eq!(c.operand, Operand::Value(Value::Ulid(target.id)));
            }
            _ => panic!("expected Clause"),
        }
    }

    #[test]
    fn base_vocabulary_reaches_through_deref() {
        let ulid = Ulid::generate();

        assert_eq!(OWNER.eq(ulid), FieldExpr::new("owner").eq(ulid));
    }
}
