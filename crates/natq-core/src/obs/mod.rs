//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! This module does not access store internals directly; all
//! instrumentation flows through `MetricsEvent` and `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, MetricsReport, OpCounters};
pub use sink::{
    MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, record, with_metrics_sink,
};
