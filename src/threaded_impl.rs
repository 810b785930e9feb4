//! Threaded driver - ticks a session from a dedicated OS thread

pub mod session_thread;

pub use session_thread::{spawn_session_thread, DriverStats};
