//! Async driver - ticks a session from a tokio task

pub mod session_task;

pub use session_task::run_session_task;
