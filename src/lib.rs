pub mod actuator;
pub mod async_impl;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod ipc;
pub mod metrics;
pub mod monitor;
pub mod session;
pub mod threaded_impl;

pub use actuator::{GainSet, PIDController, PIDState, ProcessModel};
pub use config::{load_config, AlertThresholds, GainBounds, GainRange, SessionConfig, TimeSource};
pub use error::{ControlError, ControlResult};
pub use export::{CsvExporter, CSV_HEADER};
pub use history::{HistoryLog, Sample};
pub use ipc::{AlertLog, SessionChannels, SharedGains};
pub use metrics::{MetricsReport, TimingMetrics};
pub use monitor::{AdjustedParameter, Alert, AlertEvaluator, AlertKind};
pub use session::{SimulationSession, TickReport};
