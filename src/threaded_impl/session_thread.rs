use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::ipc::SessionChannels;
use crate::session::SimulationSession;

pub struct DriverStats {
    pub ticks: AtomicU64,
    pub alerts: AtomicU64,
    pub dropped_reports: AtomicU64,
    pub failed_ticks: AtomicU64,
    pub shutdown: AtomicBool,
}

impl DriverStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            ticks: AtomicU64::new(0),
            alerts: AtomicU64::new(0),
            dropped_reports: AtomicU64::new(0),
            failed_ticks: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
        })
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

/// Ticks `session` on its own thread every `tick_interval_ms`.
///
/// Runs until shutdown is requested, `max_ticks` is reached or a tick
/// fails. Reports are offered to `channels` without blocking; a full
/// channel drops the report. Joining the handle returns the session.
pub fn spawn_session_thread(
    mut session: SimulationSession,
    channels: SessionChannels,
    max_ticks: Option<u64>,
) -> (thread::JoinHandle<SimulationSession>, Arc<DriverStats>) {
    let stats = DriverStats::new();
    let stats_clone = stats.clone();

    let handle = thread::spawn(move || {
        let dt = session.config().dt;
        let interval = Duration::from_millis(session.config().tick_interval_ms);
        let metrics = session.metrics();
        info!(dt, interval_ms = interval.as_millis() as u64, "session thread started");
        let mut last_cycle_start: Option<Instant> = None;

        loop {
            if stats_clone.shutdown.load(Ordering::Relaxed) {
                info!("session thread shutting down");
                break;
            }
            if max_ticks.is_some_and(|max| session.ticks() >= max) {
                info!(ticks = session.ticks(), "session thread reached tick limit");
                break;
            }

            let cycle_start = Instant::now();
            if let Some(prev) = last_cycle_start {
                metrics.record_cycle(cycle_start - prev);
            }
            last_cycle_start = Some(cycle_start);

            let report = match session.tick(dt) {
                Ok(r) => r,
                Err(e) => {
                    error!(error = %e, "tick failed, stopping session thread");
                    stats_clone.failed_ticks.fetch_add(1, Ordering::Relaxed);
                    break;
                }
            };
            stats_clone.ticks.fetch_add(1, Ordering::Relaxed);
            if report.alert.is_some() {
                stats_clone.alerts.fetch_add(1, Ordering::Relaxed);
            }

            if channels.report_tx.try_send(report).is_err() {
                stats_clone.dropped_reports.fetch_add(1, Ordering::Relaxed);
            }

            // Sleep to maintain the tick cadence
            let elapsed = cycle_start.elapsed();
            if elapsed < interval {
                thread::sleep(interval - elapsed);
            } else if !interval.is_zero() {
                metrics.record_overrun();
            }
        }

        session
    });

    (handle, stats)
}
