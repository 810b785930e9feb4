//! History module - Recorded samples and the shared append-only log

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// ============================================================================
// SAMPLE - One recorded tick
// ============================================================================

/// Field names double as the CSV column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "Setpoint")]
    pub setpoint: f64,
    #[serde(rename = "Process Variable")]
    pub process_variable: f64,
    #[serde(rename = "Error")]
    pub error: f64,
    #[serde(rename = "Control Output")]
    pub control_output: f64,
    #[serde(rename = "Integral")]
    pub integral: f64,
    #[serde(rename = "Adjusting Parameter")]
    pub label: String,
}

// ============================================================================
// HISTORY LOG - Thread-safe sample store with RwLock
// ============================================================================

struct HistoryInner {
    samples: VecDeque<Sample>,
    capacity: Option<usize>,
    total_appended: u64,
}

/// Cloneable handle; every clone sees the same samples.
#[derive(Clone)]
pub struct HistoryLog {
    inner: Arc<RwLock<HistoryInner>>,
}

impl HistoryLog {
    /// A log that never evicts.
    pub fn unbounded() -> Self {
        Self::with_capacity(None)
    }

    /// `Some(n)` turns the log into a ring buffer holding the newest `n` samples.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        let samples = match capacity {
            Some(n) => VecDeque::with_capacity(n),
            None => VecDeque::new(),
        };
        Self {
            inner: Arc::new(RwLock::new(HistoryInner {
                samples,
                capacity,
                total_appended: 0,
            })),
        }
    }

    pub fn append(&self, sample: Sample) {
        let mut log = self.inner.write();
        log.samples.push_back(sample);
        log.total_appended += 1;
        if let Some(cap) = log.capacity {
            while log.samples.len() > cap {
                log.samples.pop_front();
            }
        }
    }

    /// Point-in-time copy; appends made afterwards are not visible in it.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.inner.read().samples.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<Sample> {
        self.inner.read().samples.back().cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().samples.is_empty()
    }

    /// Samples ever appended, including evicted ones.
    pub fn total_appended(&self) -> u64 {
        self.inner.read().total_appended
    }

    pub fn capacity(&self) -> Option<usize> {
        self.inner.read().capacity
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::unbounded()
    }
}
