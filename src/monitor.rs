//! Monitor module - Alert policy and gain adjustment reporting

pub mod adjustment;
pub mod alert;

pub use adjustment::{detect_adjustment, AdjustedParameter};
pub use alert::{Alert, AlertEvaluator, AlertKind};
