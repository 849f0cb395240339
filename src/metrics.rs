//! Process-wide metrics hook for pipeline stages.
//!
//! Nothing is recorded until a recorder is installed with
//! [`set_pipeline_metrics`].

use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    /// Called once per overlap detection with the number of tracks scanned
    /// and pairs emitted.
    fn record_overlaps(&self, latency: Duration, tracks: usize, pairs: usize);

    /// Called once per completed match batch. `unmatched` counts rows whose
    /// distance is `None`.
    fn record_batch(&self, latency: Duration, rows: usize, unmatched: usize);

    /// Called when a batch stops early on cancellation or deadline.
    fn record_interrupt(&self, latency: Duration, rows: usize) {
        let _ = (latency, rows);
    }
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
