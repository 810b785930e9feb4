use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pid_loop_monitor::async_impl::run_session_task;
use pid_loop_monitor::config::resolve_config;
use pid_loop_monitor::threaded_impl::{spawn_session_thread, DriverStats};
use pid_loop_monitor::{SessionChannels, SimulationSession};

#[derive(Clone, Debug, ValueEnum)]
enum Driver {
    /// Tick back to back on the main thread
    Inline,
    /// Tick on a dedicated thread at the configured interval
    Thread,
    /// Tick from a tokio interval task
    Tokio,
}

#[derive(Parser, Debug)]
#[command(name = "pid-loop-monitor", version, about = "Run a simulated PID loop and export its history")]
struct Args {
    /// Session configuration (TOML). Without it config/session_config.toml
    /// is tried and defaults are used if that cannot be read
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    #[arg(value_enum, long, default_value = "inline")]
    driver: Driver,

    /// CSV file the history is written to
    #[arg(long, default_value = "pid_log.csv")]
    output: PathBuf,

    /// Override the proportional gain
    #[arg(long)]
    kp: Option<f64>,

    /// Override the integral gain
    #[arg(long)]
    ki: Option<f64>,

    /// Override the derivative gain
    #[arg(long)]
    kd: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = resolve_config(args.config.as_deref())?;
    let session = SimulationSession::new(config)?;

    if args.kp.is_some() || args.ki.is_some() || args.kd.is_some() {
        let current = session.current_gains();
        session.set_gains(
            args.kp.unwrap_or(current.kp),
            args.ki.unwrap_or(current.ki),
            args.kd.unwrap_or(current.kd),
        )?;
    }

    info!(ticks = args.ticks, driver = ?args.driver, "starting PID loop");
    let channels = SessionChannels::new(256);

    let session = match args.driver {
        Driver::Inline => run_inline(session, args.ticks)?,
        Driver::Thread => {
            let (handle, stats) = spawn_session_thread(session, channels.clone(), Some(args.ticks));
            // Keep the channel moving so the driver drops as little as possible
            while !handle.is_finished() {
                channels.drain();
                std::thread::sleep(Duration::from_millis(20));
            }
            let session = handle.join().map_err(|_| anyhow!("session thread panicked"))?;
            info!(
                dropped_reports = stats.dropped_reports.load(Ordering::Relaxed),
                "session thread joined"
            );
            session
        }
        Driver::Tokio => {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
            let stats = DriverStats::new();
            let session = runtime.block_on(run_session_task(
                session,
                channels.clone(),
                Some(args.ticks),
                stats.clone(),
            ))?;
            info!(
                dropped_reports = stats.dropped_reports.load(Ordering::Relaxed),
                "session task joined"
            );
            session
        }
    };

    let csv = session.export_csv()?;
    std::fs::write(&args.output, &csv)?;

    println!("===========================================");
    println!("PID LOOP RESULTS");
    println!("===========================================");
    println!("Ticks: {}", session.ticks());
    println!("Final process variable: {:.3} (setpoint {:.3})", session.process_variable(), session.setpoint());
    if let Some(last) = session.history().latest() {
        println!("Last error: {:.3}, last control output: {:.3}", last.error, last.control_output);
    }
    println!("Alerts raised (retained): {}", session.alert_log().len());
    println!("History written to {} ({} rows)", args.output.display(), session.history().len());

    let report = session.metrics().report();
    println!("\n=== Performance Metrics ===");
    println!("Tick P50: {:?}, P99: {:?}, max: {:?}", report.tick_p50, report.tick_p99, report.tick_max);
    println!("Export P50: {:?}", report.export_p50);
    println!("Cycle P50: {:?}, min: {:?} ({} cycles)", report.cycle_p50, report.cycle_min, report.cycles_recorded);
    println!("Cycle jitter P50: {:?}, P99: {:?} ({} overruns)", report.jitter_p50, report.jitter_p99, report.overruns);

    Ok(())
}

fn run_inline(mut session: SimulationSession, ticks: u64) -> Result<SimulationSession> {
    for _ in 0..ticks {
        session.tick_default()?;
    }
    Ok(session)
}
