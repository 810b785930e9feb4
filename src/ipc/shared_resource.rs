use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::actuator::GainSet;
use crate::config::GainBounds;
use crate::error::ControlResult;
use crate::monitor::{detect_adjustment, AdjustedParameter};

// ============================================================================
// SHARED GAINS - Gains settable from any thread, read whole by the loop
// ============================================================================

#[derive(Clone)]
pub struct SharedGains {
    data: Arc<Mutex<GainSet>>,
    bounds: Option<GainBounds>,
}

impl SharedGains {
    pub fn new(initial: GainSet, bounds: Option<GainBounds>) -> Self {
        Self {
            data: Arc::new(Mutex::new(initial)),
            bounds,
        }
    }

    /// Copies all three gains under one lock acquisition.
    pub fn get(&self) -> GainSet {
        *self.data.lock()
    }

    /// Validates and swaps in new gains, reporting which one changed.
    ///
    /// On error the stored gains are left untouched.
    pub fn set(&self, kp: f64, ki: f64, kd: f64) -> ControlResult<AdjustedParameter> {
        let incoming = GainSet::new(kp, ki, kd)?;
        if let Some(bounds) = &self.bounds {
            bounds.check(&incoming)?;
        }
        let previous = std::mem::replace(&mut *self.data.lock(), incoming);
        Ok(detect_adjustment(&previous, &incoming))
    }

    pub fn bounds(&self) -> Option<GainBounds> {
        self.bounds
    }
}

// ============================================================================
// ALERT LOG - Bounded record of raised alerts
// ============================================================================

#[derive(Clone)]
pub struct AlertLog {
    entries: Arc<RwLock<VecDeque<String>>>,
    max_size: usize,
}

impl AlertLog {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_size))),
            max_size,
        }
    }

    pub fn write(&self, message: String) {
        let mut log = self.entries.write();
        log.push_back(message);
        if log.len() > self.max_size {
            log.pop_front();
        }
    }

    pub fn read_all(&self) -> Vec<String> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<String> {
        self.entries.read().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
