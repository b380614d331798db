//! ## Crate layout
//! - `core`: placeholders, predicate/expression ASTs, values, model
//!   schemas, and observability (re-exported from `natq-core`).
//! - `db`: the embedded row store that executes predicates and
//!   expression-applied updates.
//!
//! The `prelude` module mirrors the surface used by calling code.

pub use natq_core as core;

pub mod db;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// re-exports
pub use natq_core::InternalError as Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        VERSION,
        db::{Store, StoreError, WriteReport},
    };
    pub use natq_core::prelude::*;
}
