//! Session module - Orchestrates one control loop from gains to history
//!
//! A [`SimulationSession`] owns every piece of loop state: the controller,
//! the simulated process variable, the recorded history and the alert log.
//! Drivers call [`SimulationSession::tick`]; other threads reach the gains
//! and the history through the cloneable handles the session hands out.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::actuator::{GainSet, PIDController, ProcessModel};
use crate::config::{SessionConfig, TimeSource};
use crate::error::{check_dt, ControlResult};
use crate::export::CsvExporter;
use crate::history::{HistoryLog, Sample};
use crate::ipc::{AlertLog, SharedGains};
use crate::metrics::TimingMetrics;
use crate::monitor::{AdjustedParameter, Alert, AlertEvaluator};

/// What one tick produced.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub sample: Sample,
    pub alert: Option<Alert>,
}

pub struct SimulationSession {
    config: SessionConfig,
    controller: PIDController,
    plant: ProcessModel,
    evaluator: AlertEvaluator,
    gains: SharedGains,
    history: HistoryLog,
    alert_log: AlertLog,
    metrics: TimingMetrics,
    process_variable: f64,
    elapsed: f64,
    ticks: u64,
}

impl SimulationSession {
    pub fn new(config: SessionConfig) -> ControlResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SessionConfig) -> Self {
        info!(
            setpoint = config.setpoint,
            process_variable = config.initial_process_variable,
            gains = %config.gains,
            "simulation session created"
        );
        Self {
            controller: PIDController::new(config.gains),
            plant: ProcessModel::new(),
            evaluator: AlertEvaluator::from_thresholds(&config.alerts),
            gains: SharedGains::new(config.gains, config.gain_bounds),
            history: HistoryLog::with_capacity(config.history_capacity),
            alert_log: AlertLog::new(config.alert_log_capacity),
            metrics: TimingMetrics::new(),
            process_variable: config.initial_process_variable,
            elapsed: 0.0,
            ticks: 0,
            config,
        }
    }

    /// Runs one control step over `dt` and records the result.
    ///
    /// Gains are read once at the start, so an update racing with the tick
    /// applies entirely to this tick or entirely to the next. An invalid
    /// `dt` fails before anything is mutated.
    pub fn tick(&mut self, dt: f64) -> ControlResult<TickReport> {
        let start = Instant::now();
        check_dt(dt)?;

        let gains = self.gains.get();
        self.controller.set_gains(gains);

        let (control_output, error) =
            self.controller
                .compute(self.config.setpoint, self.process_variable, dt)?;
        self.process_variable = self.plant.advance(self.process_variable, control_output, dt)?;
        self.elapsed += dt;
        self.ticks += 1;

        let sample = Sample {
            time: self.timestamp(),
            setpoint: self.config.setpoint,
            process_variable: self.process_variable,
            error,
            control_output,
            integral: self.controller.integral(),
            label: gains.to_string(),
        };

        let alert = self.evaluator.evaluate(error, control_output);
        self.history.append(sample.clone());

        debug!(
            tick = self.ticks,
            error,
            control_output,
            process_variable = self.process_variable,
            "tick"
        );
        if let Some(alert) = &alert {
            warn!(tick = self.ticks, kind = %alert.kind, "{}", alert.message);
            self.alert_log.write(alert.message.clone());
        }

        self.metrics.record_tick(start.elapsed());
        Ok(TickReport { sample, alert })
    }

    /// Ticks with the configured time step.
    pub fn tick_default(&mut self) -> ControlResult<TickReport> {
        self.tick(self.config.dt)
    }

    /// Replaces the gains used from the next tick on.
    pub fn set_gains(&self, kp: f64, ki: f64, kd: f64) -> ControlResult<AdjustedParameter> {
        match self.gains.set(kp, ki, kd) {
            Ok(adjusted) => {
                info!(kp, ki, kd, "{}", adjusted.describe());
                Ok(adjusted)
            }
            Err(e) => {
                warn!(kp, ki, kd, error = %e, "rejected gain update");
                Err(e)
            }
        }
    }

    pub fn export_csv(&self) -> ControlResult<Vec<u8>> {
        let start = Instant::now();
        let bytes = CsvExporter::dump_history(&self.history)?;
        self.metrics.record_export(start.elapsed());
        Ok(bytes)
    }

    /// Zeroes the integral and previous error. History is kept.
    pub fn reset_controller(&mut self) {
        info!(integral = self.controller.integral(), "controller state reset");
        self.controller.reset();
    }

    fn timestamp(&self) -> f64 {
        match self.config.time_source {
            TimeSource::Wall => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or_default(),
            TimeSource::Simulated => self.elapsed,
        }
    }

    pub fn gains(&self) -> SharedGains {
        self.gains.clone()
    }

    pub fn current_gains(&self) -> GainSet {
        self.gains.get()
    }

    pub fn history(&self) -> HistoryLog {
        self.history.clone()
    }

    pub fn alert_log(&self) -> AlertLog {
        self.alert_log.clone()
    }

    pub fn metrics(&self) -> TimingMetrics {
        self.metrics.clone()
    }

    pub fn controller(&self) -> &PIDController {
        &self.controller
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn setpoint(&self) -> f64 {
        self.config.setpoint
    }

    pub fn process_variable(&self) -> f64 {
        self.process_variable
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for SimulationSession {
    fn default() -> Self {
        Self::build(SessionConfig::default())
    }
}
