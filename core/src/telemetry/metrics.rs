use serde::Serialize;
use std::sync::Mutex;

/// Point-in-time copy of the pipeline counters.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MetricsSnapshot {
    pub rotations_completed: usize,
    pub contacts_spawned: usize,
    pub contacts_pruned: usize,
}

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_rotation(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rotations_completed += 1;
        }
    }

    pub fn record_contacts_spawned(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.contacts_spawned += count;
        }
    }

    pub fn record_contacts_pruned(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.contacts_pruned += count;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
