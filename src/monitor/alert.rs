use std::fmt;

use crate::config::AlertThresholds;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    HighError,
    OutputTooHigh,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::HighError => write!(f, "HighError"),
            AlertKind::OutputTooHigh => write!(f, "OutputTooHigh"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    /// The error or control output that crossed its threshold.
    pub value: f64,
    pub message: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============================================================================
// ALERT EVALUATOR - Threshold policy over error and control output
// ============================================================================

#[derive(Clone, Copy, Debug)]
pub struct AlertEvaluator {
    error_threshold: f64,
    output_threshold: f64,
}

impl AlertEvaluator {
    pub fn new(error_threshold: f64, output_threshold: f64) -> Self {
        Self {
            error_threshold,
            output_threshold,
        }
    }

    pub fn from_thresholds(thresholds: &AlertThresholds) -> Self {
        Self::new(thresholds.error_threshold, thresholds.output_threshold)
    }

    /// First matching rule wins: a large error masks a large output.
    pub fn evaluate(&self, error: f64, control_output: f64) -> Option<Alert> {
        if error.abs() > self.error_threshold {
            return Some(Alert {
                kind: AlertKind::HighError,
                value: error,
                message: format!(
                    "High error detected: {:.2}. Adjusting system to reach setpoint.",
                    error
                ),
            });
        }
        if control_output.abs() > self.output_threshold {
            return Some(Alert {
                kind: AlertKind::OutputTooHigh,
                value: control_output,
                message: format!(
                    "Control output too high: {:.2}. Consider retuning PID gains.",
                    control_output
                ),
            });
        }
        None
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::from_thresholds(&AlertThresholds::default())
    }
}
