use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::time::{interval, Duration, Instant, MissedTickBehavior};
use tracing::info;

use crate::error::ControlResult;
use crate::ipc::SessionChannels;
use crate::session::SimulationSession;
use crate::threaded_impl::DriverStats;

/// Ticks `session` on a tokio interval until shutdown is requested on
/// `stats` or `max_ticks` ticks have run, then hands the session back.
///
/// Reports that do not fit in `channels` are dropped and counted in
/// `stats.dropped_reports`.
pub async fn run_session_task(
    mut session: SimulationSession,
    channels: SessionChannels,
    max_ticks: Option<u64>,
    stats: Arc<DriverStats>,
) -> ControlResult<SimulationSession> {
    let dt = session.config().dt;
    // tokio rejects a zero period
    let period = Duration::from_millis(session.config().tick_interval_ms.max(1));
    let metrics = session.metrics();
    let mut interval_timer = interval(period);
    interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_cycle_start: Option<Instant> = None;
    info!(dt, period_ms = period.as_millis() as u64, "session task started");

    loop {
        interval_timer.tick().await;

        if stats.shutdown.load(Ordering::Relaxed) {
            break;
        }
        if max_ticks.is_some_and(|max| session.ticks() >= max) {
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
                stats.failed_ticks.fetch_add(1, Ordering::Relaxed);
                return Err(e);
            }
        };
        stats.ticks.fetch_add(1, Ordering::Relaxed);
        if report.alert.is_some() {
            stats.alerts.fetch_add(1, Ordering::Relaxed);
        }

        // Display consumers may lag; never stall the loop on them
        if channels.report_tx.try_send(report).is_err() {
            stats.dropped_reports.fetch_add(1, Ordering::Relaxed);
        }
    }

    info!(
        ticks = session.ticks(),
        dropped_reports = stats.dropped_reports.load(Ordering::Relaxed),
        "session task finished"
    );
    Ok(session)
}
