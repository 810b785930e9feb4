//! Actuator module - PID control law and the simulated plant it drives

pub mod controller;
pub mod plant;

pub use controller::{GainSet, PIDController, PIDState};
pub use plant::ProcessModel;
