use crate::error::{check_dt, ControlResult};

/// First-order integrator standing in for the controlled process.
///
/// `pv' = pv + u * dt`. This is a numerical stand-in, not a physical model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessModel;

impl ProcessModel {
    pub fn new() -> Self {
        Self
    }

    pub fn advance(&self, process_variable: f64, control_output: f64, dt: f64) -> ControlResult<f64> {
        check_dt(dt)?;
        Ok(process_variable + control_output * dt)
    }
}
