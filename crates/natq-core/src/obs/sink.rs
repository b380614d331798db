//! Metrics sink boundary.
//!
//! Engine logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between execution logic
//! and the thread-local metrics state.
use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    FilterExec {
        entity_path: &'static str,
    },
    RowsScanned {
        entity_path: &'static str,
        rows_scanned: u64,
    },
    RowsMatched {
        entity_path: &'static str,
        rows_matched: u64,
    },
    DeleteExec {
        entity_path: &'static str,
        rows_deleted: u64,
    },
    UpdateExec {
        entity_path: &'static str,
        rows_updated: u64,
        rows_skipped: u64,
    },
    MixinAttached {
        target_path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default process-local sink that writes into thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::FilterExec { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.filter_calls = m.ops.filter_calls.saturating_add(1);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.filter_calls = entry.filter_calls.saturating_add(1);
                });
            }

            MetricsEvent::RowsScanned {
                entity_path,
                rows_scanned,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows_scanned);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.rows_scanned = entry.rows_scanned.saturating_add(rows_scanned);
                });
            }

            MetricsEvent::RowsMatched {
                entity_path,
                rows_matched,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_matched = m.ops.rows_matched.saturating_add(rows_matched);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.rows_matched = entry.rows_matched.saturating_add(rows_matched);
                });
            }

            MetricsEvent::DeleteExec {
                entity_path,
                rows_deleted,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.delete_calls = m.ops.delete_calls.saturating_add(1);
                    m.ops.rows_deleted = m.ops.rows_deleted.saturating_add(rows_deleted);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.rows_deleted = entry.rows_deleted.saturating_add(rows_deleted);
                });
            }

            MetricsEvent::UpdateExec {
                entity_path,
                rows_updated,
                rows_skipped,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.update_calls = m.ops.update_calls.saturating_add(1);
                    m.ops.rows_updated = m.ops.rows_updated.saturating_add(rows_updated);
                    m.ops.rows_skipped = m.ops.rows_skipped.saturating_add(rows_skipped);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.rows_updated = entry.rows_updated.saturating_add(rows_updated);
                    entry.rows_skipped = entry.rows_skipped.saturating_add(rows_skipped);
                });
            }

            MetricsEvent::MixinAttached { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.mixins_attached = m.ops.mixins_attached.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with_borrow(Clone::clone);
    if let Some(sink) = override_sink {
        sink.record(event);
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current metrics state for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> metrics::MetricsReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous override (if any) is restored on all exits, including
/// unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with_borrow_mut(|slot| {
                *slot = self.0.take();
            });
        }
    }

    let prev = SINK_OVERRIDE.with_borrow_mut(|slot| slot.replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        panic::{AssertUnwindSafe, catch_unwind},
    };

    struct CountingSink {
        calls: Cell<usize>,
    }

    impl CountingSink {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                calls: Cell::new(0),
            })
        }
    }

    impl MetricsSink for CountingSink {
        fn record(&self, _: MetricsEvent) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    const ENTITY: &str = "obs_tests::Entity";

    #[test]
    fn with_metrics_sink_routes_and_restores_nested_overrides() {
        SINK_OVERRIDE.with_borrow_mut(|slot| *slot = None);

        let outer = CountingSink::new();
        let inner = CountingSink::new();

        // No override installed yet.
        record(MetricsEvent::FilterExec {
            entity_path: ENTITY,
        });
        assert_eq!(outer.calls.get(), 0);
        assert_eq!(inner.calls.get(), 0);

        with_metrics_sink(outer.clone(), || {
            record(MetricsEvent::FilterExec {
                entity_path: ENTITY,
            });
            assert_eq!(outer.calls.get(), 1);
            assert_eq!(inner.calls.get(), 0);

            with_metrics_sink(inner.clone(), || {
                record(MetricsEvent::FilterExec {
                    entity_path: ENTITY,
                });
            });

            // Inner override was restored to outer override.
            record(MetricsEvent::FilterExec {
                entity_path: ENTITY,
            });
        });

        assert_eq!(outer.calls.get(), 2);
        assert_eq!(inner.calls.get(), 1);

        // Outer override was restored to previous (none).
        SINK_OVERRIDE.with_borrow(|slot| assert!(slot.is_none()));
    }

    #[test]
    fn with_metrics_sink_restores_override_on_panic() {
        SINK_OVERRIDE.with_borrow_mut(|slot| *slot = None);

        let sink = CountingSink::new();

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(sink.clone(), || {
                record(MetricsEvent::FilterExec {
                    entity_path: ENTITY,
                });
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();
        assert!(panicked);
        assert_eq!(sink.calls.get(), 1);

        // Guard restored TLS slot after unwind.
        SINK_OVERRIDE.with_borrow(|slot| assert!(slot.is_none()));

        record(MetricsEvent::FilterExec {
            entity_path: ENTITY,
        });
        assert_eq!(sink.calls.get(), 1);
    }

    #[test]
    fn global_sink_accumulates_counters() {
        SINK_OVERRIDE.with_borrow_mut(|slot| *slot = None);
        metrics_reset_all();

        record(MetricsEvent::FilterExec {
            entity_path: ENTITY,
        });
        record(MetricsEvent::RowsScanned {
            entity_path: ENTITY,
            rows_scanned: 3,
        });
        record(MetricsEvent::RowsMatched {
            entity_path: ENTITY,
            rows_matched: 2,
        });
        record(MetricsEvent::UpdateExec {
            entity_path: ENTITY,
            rows_updated: 2,
            rows_skipped: 1,
        });
        record(MetricsEvent::DeleteExec {
            entity_path: ENTITY,
            rows_deleted: 1,
        });
        record(MetricsEvent::MixinAttached {
            target_path: ENTITY,
        });

        let report = metrics_report();
        assert_eq!(report.ops.filter_calls, 1);
        assert_eq!(report.ops.rows_scanned, 3);
        assert_eq!(report.ops.rows_matched, 2);
        assert_eq!(report.ops.update_calls, 1);
        assert_eq!(report.ops.rows_updated, 2);
        assert_eq!(report.ops.rows_skipped, 1);
        assert_eq!(report.ops.delete_calls, 1);
        assert_eq!(report.ops.rows_deleted, 1);
        assert_eq!(report.ops.mixins_attached, 1);

        let entity = report
            .entities
            .get(ENTITY)
            .expect("entity counters should be present");
        assert_eq!(entity.filter_calls, 1);
        assert_eq!(entity.rows_scanned, 3);
        assert_eq!(entity.rows_matched, 2);
        assert_eq!(entity.rows_updated, 2);
        assert_eq!(entity.rows_skipped, 1);
        assert_eq!(entity.rows_deleted, 1);
    }
}
