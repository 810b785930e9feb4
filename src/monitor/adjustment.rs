use std::fmt;

use crate::actuator::GainSet;

/// Which gain an update touched, checked in Kp, Ki, Kd order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdjustedParameter {
    Proportional,
    Integral,
    Derivative,
    None,
}

impl AdjustedParameter {
    pub fn describe(&self) -> String {
        format!("Adjusting Parameter: {}", self)
    }
}

impl fmt::Display for AdjustedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustedParameter::Proportional => write!(f, "Proportional Gain (Kp)"),
            AdjustedParameter::Integral => write!(f, "Integral Gain (Ki)"),
            AdjustedParameter::Derivative => write!(f, "Derivative Gain (Kd)"),
            AdjustedParameter::None => write!(f, "None"),
        }
    }
}

/// Compares the gains stored before an update against the incoming ones.
pub fn detect_adjustment(previous: &GainSet, incoming: &GainSet) -> AdjustedParameter {
    if previous.kp != incoming.kp {
        AdjustedParameter::Proportional
    } else if previous.ki != incoming.ki {
        AdjustedParameter::Integral
    } else if previous.kd != incoming.kd {
        AdjustedParameter::Derivative
    } else {
        AdjustedParameter::None
    }
}
