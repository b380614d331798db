use natq_core::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    obs::{MetricsEvent, record},
    query::{Expr, Predicate, eval::eval},
    traits::{EntityIdentity, EntityKind, FieldValues, FieldWrite},
    types::Ulid,
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// StoreError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("no row matched for '{path}'")]
    NotFound { path: &'static str },

    #[error("{found} rows matched for '{path}', expected exactly one")]
    MultipleRows { path: &'static str, found: usize },
}

impl StoreError {
    const fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::MultipleRows { .. } => ErrorClass::Conflict,
        }
    }
}

impl From<StoreError> for InternalError {
    fn from(err: StoreError) -> Self {
        Self::new(err.class(), ErrorOrigin::Store, err.to_string())
    }
}

///
/// WriteReport
///
/// Outcome of an expression-applied update. Rows whose expression
/// evaluation fails, or whose write-back is rejected, are skipped and
/// counted rather than aborting the batch.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WriteReport {
    pub matched: usize,
    pub updated: usize,
    pub skipped: usize,
}

///
/// Store
///
/// Embedded in-memory row store keyed by ULID. Executes predicates and
/// expressions built by the placeholder layer; scans run in key order.
/// Intentionally not a persistence engine.
///

pub struct Store<E>
where
    E: EntityKind + EntityIdentity + FieldValues + FieldWrite + Clone,
{
    rows: BTreeMap<Ulid, E>,
}

impl<E> Store<E>
where
    E: EntityKind + EntityIdentity + FieldValues + FieldWrite + Clone,
{
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// Insert an entity under a freshly generated identity.
    ///
    /// The assigned ULID is written back through the identity accessor
    /// and returned.
    pub fn insert(&mut self, mut entity: E) -> Ulid {
        let id = Ulid::generate();
        entity.set_id(id);
        self.rows.insert(id, entity);

        id
    }

    /// Look up a row by identity.
    #[must_use]
    pub fn get_by_id(&self, id: Ulid) -> Option<&E> {
        self.rows.get(&id)
    }

    /// Return all rows matching the predicate, in key order.
    #[must_use]
    pub fn filter(&self, predicate: &Predicate) -> Vec<E> {
        record(MetricsEvent::FilterExec {
            entity_path: E::PATH,
        });

        let matches: Vec<E> = self
            .rows
            .values()
            .filter(|row| eval(*row, predicate))
            .cloned()
            .collect();

        self.record_scan(matches.len() as u64);

        matches
    }

    /// Return exactly one matching row.
    pub fn get(&self, predicate: &Predicate) -> Result<E, StoreError> {
        let mut matches = self.filter(predicate);

        match matches.len() {
            0 => Err(StoreError::NotFound { path: E::PATH }),
            1 => Ok(matches.remove(0)),
            found => Err(StoreError::MultipleRows {
                path: E::PATH,
                found,
            }),
        }
    }

    /// Count rows matching the predicate without cloning them.
    #[must_use]
    pub fn count(&self, predicate: &Predicate) -> usize {
        self.rows.values().filter(|row| eval(*row, predicate)).count()
    }

    /// Delete all matching rows; returns how many were removed.
    pub fn delete_where(&mut self, predicate: &Predicate) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !eval(&*row, predicate));
        let deleted = before - self.rows.len();

        record(MetricsEvent::DeleteExec {
            entity_path: E::PATH,
            rows_deleted: deleted as u64,
        });

        deleted
    }

    /// Apply an evaluated expression to one field of every matching row.
    ///
    /// Each row's expression is evaluated against that row's current
    /// values, then written back through `FieldWrite`. Rows where
    /// evaluation or write-back fails are skipped and counted.
    pub fn update_field(&mut self, predicate: &Predicate, field: &str, expr: &Expr) -> WriteReport {
        let ids: Vec<Ulid> = self
            .rows
            .iter()
            .filter(|(_, row)| eval(*row, predicate))
            .map(|(id, _)| *id)
            .collect();

        let mut report = WriteReport {
            matched: ids.len(),
            ..WriteReport::default()
        };

        for id in ids {
            let Some(row) = self.rows.get_mut(&id) else {
                continue;
            };

            match expr.eval(&*row) {
                Some(value) if row.set_value(field, &value) => report.updated += 1,
                _ => report.skipped += 1,
            }
        }

        record(MetricsEvent::UpdateExec {
            entity_path: E::PATH,
            rows_updated: report.updated as u64,
            rows_skipped: report.skipped as u64,
        });

        report
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    fn record_scan(&self, rows_matched: u64) {
        record(MetricsEvent::RowsScanned {
            entity_path: E::PATH,
            rows_scanned: self.rows.len() as u64,
        });
        record(MetricsEvent::RowsMatched {
            entity_path: E::PATH,
            rows_matched,
        });
    }
}

impl<E> Default for Store<E>
where
    E: EntityKind + EntityIdentity + FieldValues + FieldWrite + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
