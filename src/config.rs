//! Session configuration - TOML file loading and validation

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::actuator::GainSet;
use crate::error::{ControlError, ControlResult};

// ============================================================================
// SESSION CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub setpoint: f64,
    pub initial_process_variable: f64,
    /// Time step used by drivers and `tick_default`.
    pub dt: f64,
    /// Wall-clock cadence for the thread and tokio drivers.
    pub tick_interval_ms: u64,
    pub gains: GainSet,
    pub alerts: AlertThresholds,
    /// `None` keeps every sample; `Some(n)` keeps the newest `n`.
    pub history_capacity: Option<usize>,
    pub alert_log_capacity: usize,
    pub time_source: TimeSource,
    pub gain_bounds: Option<GainBounds>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            setpoint: 100.0,
            initial_process_variable: 50.0,
            dt: 0.1,
            tick_interval_ms: 100,
            gains: GainSet::default(),
            alerts: AlertThresholds::default(),
            history_capacity: None,
            alert_log_capacity: 256,
            time_source: TimeSource::Wall,
            gain_bounds: None,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> ControlResult<Self> {
        let config: SessionConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ControlResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ControlError::Config(format!("dt must be positive, got {}", self.dt)));
        }
        if !self.setpoint.is_finite() || !self.initial_process_variable.is_finite() {
            return Err(ControlError::Config(
                "setpoint and initial_process_variable must be finite".to_string(),
            ));
        }
        if !(self.alerts.error_threshold >= 0.0 && self.alerts.output_threshold >= 0.0) {
            return Err(ControlError::Config("alert thresholds must be non-negative".to_string()));
        }
        if self.history_capacity == Some(0) {
            return Err(ControlError::Config("history_capacity must be at least 1".to_string()));
        }
        if self.alert_log_capacity == 0 {
            return Err(ControlError::Config("alert_log_capacity must be at least 1".to_string()));
        }
        self.gains
            .check_finite()
            .map_err(|e| ControlError::Config(format!("initial gains: {e}")))?;
        if let Some(bounds) = &self.gain_bounds {
            bounds.validate()?;
            bounds
                .check(&self.gains)
                .map_err(|e| ControlError::Config(format!("initial gains: {e}")))?;
        }
        Ok(())
    }
}

// ============================================================================
// ALERT THRESHOLDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub error_threshold: f64,
    pub output_threshold: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            error_threshold: 10.0,
            output_threshold: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSource {
    /// Seconds since the UNIX epoch at the end of each tick.
    #[default]
    Wall,
    /// Sum of the time steps executed so far.
    Simulated,
}

// ============================================================================
// GAIN BOUNDS - Optional per-gain ranges enforced on updates
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainRange {
    pub min: f64,
    pub max: f64,
}

impl GainRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainBounds {
    pub kp: GainRange,
    pub ki: GainRange,
    pub kd: GainRange,
}

impl Default for GainBounds {
    /// Kp in 0.1..=5.0, Ki and Kd in 0.0..=1.0.
    fn default() -> Self {
        Self {
            kp: GainRange { min: 0.1, max: 5.0 },
            ki: GainRange { min: 0.0, max: 1.0 },
            kd: GainRange { min: 0.0, max: 1.0 },
        }
    }
}

impl GainBounds {
    pub fn validate(&self) -> ControlResult<()> {
        for (name, range) in [("kp", self.kp), ("ki", self.ki), ("kd", self.kd)] {
            if !(range.min.is_finite() && range.max.is_finite() && range.min <= range.max) {
                return Err(ControlError::Config(format!(
                    "gain_bounds.{name} must satisfy min <= max, got [{}, {}]",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }

    pub fn check(&self, gains: &GainSet) -> ControlResult<()> {
        for (name, range, value) in [
            ("Kp", self.kp, gains.kp),
            ("Ki", self.ki, gains.ki),
            ("Kd", self.kd, gains.kd),
        ] {
            if !range.contains(value) {
                return Err(ControlError::InvalidArgument(format!(
                    "{name} = {value} outside [{}, {}]",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// CONFIG FILE LOADING
// ============================================================================

pub fn load_config<P: AsRef<Path>>(path: P) -> ControlResult<SessionConfig> {
    let s = std::fs::read_to_string(path)?;
    SessionConfig::from_toml_str(&s)
}

/// Loads the file, falling back to defaults when it is missing or invalid.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> SessionConfig {
    let path = path.as_ref();
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "using default session config");
            SessionConfig::default()
        }
    }
}

pub const DEFAULT_CONFIG_PATH: &str = "config/session_config.toml";

/// A path the user named must load cleanly; only the built-in default path
/// falls back to defaults.
pub fn resolve_config(explicit: Option<&Path>) -> ControlResult<SessionConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => Ok(load_or_default(DEFAULT_CONFIG_PATH)),
    }
}
