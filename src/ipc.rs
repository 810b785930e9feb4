//! IPC module - State shared between the control loop and other threads

pub mod channels;
pub mod shared_resource;

pub use channels::SessionChannels;
pub use shared_resource::{AlertLog, SharedGains};
