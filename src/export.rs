//! Export module - CSV serialization of recorded samples

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::ControlResult;
use crate::history::{HistoryLog, Sample};

pub const CSV_HEADER: [&str; 7] = [
    "Time",
    "Setpoint",
    "Process Variable",
    "Error",
    "Control Output",
    "Integral",
    "Adjusting Parameter",
];

pub struct CsvExporter;

impl CsvExporter {
    /// Serializes samples to CSV bytes. The header is written even when
    /// `samples` is empty.
    pub fn dump(samples: &[Sample]) -> ControlResult<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::write_to(samples, &mut buffer)?;
        Ok(buffer)
    }

    /// Snapshots the log first so serialization never holds its lock.
    pub fn dump_history(history: &HistoryLog) -> ControlResult<Vec<u8>> {
        Self::dump(&history.snapshot())
    }

    pub fn write_to<W: Write>(samples: &[Sample], writer: W) -> ControlResult<()> {
        // Header goes out by hand; serde would skip it for an empty slice
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(CSV_HEADER)?;
        for sample in samples {
            wtr.serialize(sample)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(samples: &[Sample], path: P) -> ControlResult<()> {
        let file = File::create(path)?;
        Self::write_to(samples, file)
    }

    /// Reads back a log produced by [`CsvExporter::dump`].
    pub fn parse(bytes: &[u8]) -> ControlResult<Vec<Sample>> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
        let mut samples = Vec::new();
        for record in reader.deserialize() {
            let sample: Sample = record?;
            samples.push(sample);
        }
        Ok(samples)
    }
}
