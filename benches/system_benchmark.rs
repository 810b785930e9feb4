use criterion::{criterion_group, criterion_main, Criterion};
use pid_loop_monitor::{GainSet, PIDController, SessionConfig, SimulationSession, TimeSource};

fn benchmark_pid_control(c: &mut Criterion) {
    let mut pid = PIDController::new(GainSet::default());
    c.bench_function("pid_compute", |b| b.iter(|| pid.compute(100.0, 48.0, 0.1)));
}

fn benchmark_session_tick(c: &mut Criterion) {
    let config = SessionConfig {
        history_capacity: Some(10_000),
        time_source: TimeSource::Simulated,
        ..SessionConfig::default()
    };
    let mut session = SimulationSession::new(config).expect("valid config");
    c.bench_function("session_tick", |b| b.iter(|| session.tick(0.1)));
}

fn benchmark_export(c: &mut Criterion) {
    let mut session = SimulationSession::default();
    for _ in 0..1000 {
        session.tick_default().expect("valid dt");
    }
    c.bench_function("export_csv_1000", |b| b.iter(|| session.export_csv()));
}

criterion_group!(benches, benchmark_pid_control, benchmark_session_tick, benchmark_export);
criterion_main!(benches);
