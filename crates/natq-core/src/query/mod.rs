pub mod eval;
pub mod expr;
pub mod field;
pub mod operand;
pub mod pk;
pub mod predicate;
pub mod relation;
pub mod temporal;

pub use expr::{ArithOp, Expr, IntoExpr};
pub use field::FieldExpr;
pub use operand::{FieldPath, IntoOperand, Operand};
pub use pk::PkFieldExpr;
pub use predicate::{Clause, CmpOp, Predicate};
pub use relation::RelationFieldExpr;
pub use temporal::{DateFieldExpr, DatePart, DatePartExpr, DateTimeFieldExpr};
