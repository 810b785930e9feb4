use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{check_dt, ControlError, ControlResult};

// ============================================================================
// GAIN SET - Proportional, integral and derivative gains
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GainSet {
    pub kp: f64, // Proportional
    pub ki: f64, // Integral
    pub kd: f64, // Derivative
}

impl GainSet {
    /// Builds a gain set, rejecting NaN and infinite gains.
    pub fn new(kp: f64, ki: f64, kd: f64) -> ControlResult<Self> {
        let gains = Self { kp, ki, kd };
        gains.check_finite()?;
        Ok(gains)
    }

    pub fn check_finite(&self) -> ControlResult<()> {
        for (name, value) in [("Kp", self.kp), ("Ki", self.ki), ("Kd", self.kd)] {
            if !value.is_finite() {
                return Err(ControlError::InvalidArgument(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for GainSet {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.1,
            kd: 0.05,
        }
    }
}

/// Renders the label stored with every sample.
impl fmt::Display for GainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kp: {:.2}, Ki: {:.2}, Kd: {:.2}", self.kp, self.ki, self.kd)
    }
}

// ============================================================================
// PID STATE
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PIDState {
    pub integral: f64,
    pub previous_error: f64,
}

// ============================================================================
// PID CONTROLLER - Proportional-Integral-Derivative control
// ============================================================================

/// Unclamped PID law over a caller-supplied time step.
///
/// The integral keeps accumulating `error * dt` until [`PIDController::reset`]
/// is called; there is no windup guard and no output saturation.
#[derive(Debug, Clone)]
pub struct PIDController {
    gains: GainSet,
    state: PIDState,
}

impl PIDController {
    pub fn new(gains: GainSet) -> Self {
        Self {
            gains,
            state: PIDState::default(),
        }
    }

    /// Advances the controller by one step and returns `(output, error)`.
    ///
    /// Mutates the integral and previous error exactly once, so it must be
    /// called once per tick. A non-positive `dt` is rejected before any
    /// state changes.
    pub fn compute(&mut self, setpoint: f64, process_variable: f64, dt: f64) -> ControlResult<(f64, f64)> {
        check_dt(dt)?;

        let error = setpoint - process_variable;

        // Proportional term
        let p = self.gains.kp * error;

        // Integral term
        self.state.integral += error * dt;
        let i = self.gains.ki * self.state.integral;

        // Derivative term
        let derivative = (error - self.state.previous_error) / dt;
        let d = self.gains.kd * derivative;

        self.state.previous_error = error;

        Ok((p + i + d, error))
    }

    pub fn set_gains(&mut self, gains: GainSet) {
        self.gains = gains;
    }

    pub fn gains(&self) -> GainSet {
        self.gains
    }

    pub fn state(&self) -> PIDState {
        self.state
    }

    pub fn integral(&self) -> f64 {
        self.state.integral
    }

    pub fn previous_error(&self) -> f64 {
        self.state.previous_error
    }

    pub fn reset(&mut self) {
        self.state = PIDState::default();
    }
}
