use crossbeam::channel::{bounded, Receiver, Sender};

use crate::session::TickReport;

/// Carries tick reports from a driver to whoever displays them.
#[derive(Clone)]
pub struct SessionChannels {
    pub report_tx: Sender<TickReport>,
    pub report_rx: Receiver<TickReport>,
}

impl SessionChannels {
    pub fn new(buffer_size: usize) -> Self {
        let (report_tx, report_rx) = bounded(buffer_size);
        Self { report_tx, report_rx }
    }

    /// Drains every report currently queued without blocking.
    pub fn drain(&self) -> Vec<TickReport> {
        self.report_rx.try_iter().collect()
    }
}
