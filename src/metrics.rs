//! Metrics module - Tick and export latency tracking

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hdrhistogram::Histogram;
use parking_lot::Mutex;

fn new_histogram() -> Arc<Mutex<Histogram<u64>>> {
    // 3 significant figures is always within hdrhistogram's accepted 0..=5
    Arc::new(Mutex::new(Histogram::new(3).expect("valid histogram precision")))
}

// ============================================================================
// TIMING METRICS - Thread-safe performance tracking
// ============================================================================

#[derive(Clone)]
pub struct TimingMetrics {
    tick_hist: Arc<Mutex<Histogram<u64>>>,
    export_hist: Arc<Mutex<Histogram<u64>>>,
    // Start-to-start length of driver cycles and its variation
    cycle_hist: Arc<Mutex<Histogram<u64>>>,
    last_cycle_time_ns: Arc<AtomicU64>,
    jitter_hist: Arc<Mutex<Histogram<u64>>>,
    overruns: Arc<AtomicU64>,
}

impl TimingMetrics {
    pub fn new() -> Self {
        Self {
            tick_hist: new_histogram(),
            export_hist: new_histogram(),
            cycle_hist: new_histogram(),
            last_cycle_time_ns: Arc::new(AtomicU64::new(0)),
            jitter_hist: new_histogram(),
            overruns: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_tick(&self, duration: Duration) {
        self.tick_hist.lock().record(duration.as_nanos() as u64).ok();
    }

    pub fn record_export(&self, duration: Duration) {
        self.export_hist.lock().record(duration.as_nanos() as u64).ok();
    }

    /// Records the time between the starts of two consecutive driver cycles,
    /// and its change from the previous cycle as jitter.
    pub fn record_cycle(&self, cycle: Duration) {
        let cycle_duration_ns = cycle.as_nanos() as u64;
        self.cycle_hist.lock().record(cycle_duration_ns).ok();
        let last = self.last_cycle_time_ns.swap(cycle_duration_ns, Ordering::Relaxed);
        if last > 0 {
            self.jitter_hist.lock().record(cycle_duration_ns.abs_diff(last)).ok();
        }
    }

    /// A driver cycle took longer than its configured interval.
    pub fn record_overrun(&self) {
        self.overruns.fetch_add(1, Ordering::Relaxed);
    }

    pub fn report(&self) -> MetricsReport {
        let tick = self.tick_hist.lock();
        let export = self.export_hist.lock();
        let cycle = self.cycle_hist.lock();
        let jitter = self.jitter_hist.lock();

        MetricsReport {
            ticks_recorded: tick.len(),
            tick_p50: Duration::from_nanos(tick.value_at_quantile(0.5)),
            tick_p99: Duration::from_nanos(tick.value_at_quantile(0.99)),
            tick_max: Duration::from_nanos(tick.max()),
            exports_recorded: export.len(),
            export_p50: Duration::from_nanos(export.value_at_quantile(0.5)),
            export_p99: Duration::from_nanos(export.value_at_quantile(0.99)),
            cycles_recorded: cycle.len(),
            cycle_p50: Duration::from_nanos(cycle.value_at_quantile(0.5)),
            cycle_min: Duration::from_nanos(cycle.min()),
            jitter_p50: Duration::from_nanos(jitter.value_at_quantile(0.5)),
            jitter_p99: Duration::from_nanos(jitter.value_at_quantile(0.99)),
            overruns: self.overruns.load(Ordering::Relaxed),
        }
    }
}

impl Default for TimingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// METRICS REPORT - Summary statistics
// ============================================================================

#[derive(Debug)]
pub struct MetricsReport {
    pub ticks_recorded: u64,
    pub tick_p50: Duration,
    pub tick_p99: Duration,
    pub tick_max: Duration,
    pub exports_recorded: u64,
    pub export_p50: Duration,
    pub export_p99: Duration,
    pub cycles_recorded: u64,
    pub cycle_p50: Duration,
    pub cycle_min: Duration,
    pub jitter_p50: Duration,
    pub jitter_p99: Duration,
    pub overruns: u64,
}
