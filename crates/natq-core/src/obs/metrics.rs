use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

thread_local! {
    static STATE: RefCell<MetricsState> = RefCell::new(MetricsState::default());
}

///
/// OpCounters
/// Engine-wide operation counters.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct OpCounters {
    pub filter_calls: u64,
    pub rows_scanned: u64,
    pub rows_matched: u64,
    pub delete_calls: u64,
    pub rows_deleted: u64,
    pub update_calls: u64,
    pub rows_updated: u64,
    pub rows_skipped: u64,
    pub mixins_attached: u64,
}

///
/// EntityCounters
/// Per-entity slice of the same counters.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub filter_calls: u64,
    pub rows_scanned: u64,
    pub rows_matched: u64,
    pub rows_deleted: u64,
    pub rows_updated: u64,
    pub rows_skipped: u64,
}

///
/// MetricsState
///

#[derive(Clone, Debug, Default)]
pub(crate) struct MetricsState {
    pub ops: OpCounters,
    pub entities: BTreeMap<String, EntityCounters>,
}

///
/// MetricsReport
/// Point-in-time snapshot for endpoint/test plumbing.
///

#[derive(Clone, Debug, Serialize)]
pub struct MetricsReport {
    pub ops: OpCounters,
    pub entities: BTreeMap<String, EntityCounters>,
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut MetricsState) -> R) -> R {
    STATE.with_borrow_mut(f)
}

pub(crate) fn report() -> MetricsReport {
    STATE.with_borrow(|state| MetricsReport {
        ops: state.ops.clone(),
        entities: state.entities.clone(),
    })
}

pub(crate) fn reset_all() {
    STATE.with_borrow_mut(|state| *state = MetricsState::default());
}
