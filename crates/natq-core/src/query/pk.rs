use crate::{
    query::{
        expr::{Expr, IntoExpr},
        field::FieldExpr,
        operand::{IntoOperand, Operand},
    },
    traits::EntityIdentity,
    types::Ulid,
};
use std::ops::Deref;

///
/// PkFieldExpr
///
/// Placeholder for the identity field. Derefs to `FieldExpr` for the
/// full predicate-building vocabulary, fixed to `id`; additionally a
/// readable/writable accessor over entity instances.
///

// NOTE: no PartialEq derive; a trait `eq` candidate on the reference
// would shadow the deref'd builder vocabulary.
#[derive(Clone, Copy, Debug, Default)]
pub struct PkFieldExpr {
    field: FieldExpr,
}

impl PkFieldExpr {
    pub const FIELD_NAME: &'static str = "id";

    #[must_use]
    pub const fn new() -> Self {
        Self {
            field: FieldExpr::new(Self::FIELD_NAME),
        }
    }

    /// Read the instance's current identity value.
    #[must_use]
    pub fn get(&self, entity: &impl EntityIdentity) -> Ulid {
        entity.id()
    }

    /// Write the instance's identity value.
    pub fn set(&self, entity: &mut impl EntityIdentity, id: Ulid) {
        entity.set_id(id);
    }
}

impl Deref for PkFieldExpr {
    type Target = FieldExpr;

    fn deref(&self) -> &Self::Target {
        &self.field
    }
}

impl IntoOperand for PkFieldExpr {
    fn into_operand(self) -> Operand {
        self.field.into_operand()
    }
}

impl IntoOperand for &PkFieldExpr {
    fn into_operand(self) -> Operand {
        self.field.into_operand()
    }
}

impl IntoExpr for PkFieldExpr {
    fn into_expr(self) -> Expr {
        self.field.into_expr()
    }
}

impl IntoExpr for &PkFieldExpr {
    fn into_expr(self) -> Expr {
        self.field.into_expr()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::predicate::{CmpOp, Predicate};

    const PK: PkFieldExpr = PkFieldExpr::new();

    struct Row {
        id: Ulid,
    }

    impl EntityIdentity for Row {
        fn id(&self) -> Ulid {
            self.id
        }

        fn set_id(&mut self, id: Ulid) {
            self.id = id;
        }
    }

    #[test]
    fn accessor_reads_and_writes_instance_identity() {
        let mut row = Row { id: Ulid::nil() };
        let ulid = Ulid::generate();

        PK.set(&mut row, ulid);
        assert_eq!(PK.get(&row), ulid);
    }

    #[test]
    fn builder_vocabulary_targets_the_id_field() {
        let ulid = Ulid::generate();
        let pred = PK.eq(ulid);

        match pred {
            Predicate::Clause(c) => {
                assert_eq!(c.path.name, "id");
                assert_eq!(c.op, CmpOp::Eq);
            }
            _ => panic!("expected Clause"),
        }
    }
}
