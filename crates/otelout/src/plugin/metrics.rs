use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

/// Counters for flush activity.
///
/// Shared by every flush call of one plugin instance, so all fields are
/// atomics with `Ordering::Relaxed`. `snapshot()` reads are not atomic across
/// fields; a snapshot taken during a flush may be slightly torn.
#[derive(Debug, Default)]
pub struct FlushMetrics {
    pub flushes: AtomicU64,
    pub records_in: AtomicU64,
    pub records_out: AtomicU64,
    pub groups_started: AtomicU64,
    pub groups_ended: AtomicU64,
    pub invalid_timestamps: AtomicU64,
    pub decode_errors: AtomicU64,
    pub sink_errors: AtomicU64,
}

impl FlushMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_flush(&self, records_in: u64) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        self.records_in.fetch_add(records_in, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_emitted(&self, count: u64) {
        self.records_out.fetch_add(count, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_group_start(&self) {
        self.groups_started.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_group_end(&self) {
        self.groups_ended.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_invalid_timestamp(&self) {
        self.invalid_timestamps.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_sink_error(&self) {
        self.sink_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            flushes: self.flushes.load(Ordering::Relaxed),
            records_in: self.records_in.load(Ordering::Relaxed),
            records_out: self.records_out.load(Ordering::Relaxed),
            groups_started: self.groups_started.load(Ordering::Relaxed),
            groups_ended: self.groups_ended.load(Ordering::Relaxed),
            invalid_timestamps: self.invalid_timestamps.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            sink_errors: self.sink_errors.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub flushes: u64,
    pub records_in: u64,
    pub records_out: u64,
    pub groups_started: u64,
    pub groups_ended: u64,
    pub invalid_timestamps: u64,
    pub decode_errors: u64,
    pub sink_errors: u64,
}
