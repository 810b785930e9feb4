//! Error types shared by every part of the control loop

use thiserror::Error;

/// Root error type for control, configuration and export failures.
#[derive(Error, Debug)]
pub enum ControlError {
    /// A caller passed a value the loop cannot work with (dt, gains).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration values are inconsistent.
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ControlResult<T> = Result<T, ControlError>;

/// Rejects time steps that are not strictly positive and finite.
pub fn check_dt(dt: f64) -> ControlResult<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(ControlError::InvalidArgument(format!(
            "time step must be positive and finite, got {dt}"
        )))
    }
}
