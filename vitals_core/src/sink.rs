//! Append-only log of classification results.
//!
//! Each logged classification becomes one UTF-8 line in a plain text file.
//! The file is opened, locked, written and closed within a single append.

use crate::{NormalizedReading, Reading, Result, Status};
use fs2::FileExt;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// One logged classification
///
/// Raw values are written with `f64` Display, so whole numbers drop their
/// fractional part (`160.0` logs as `HR=160`) and other values keep their
/// shortest exact form (`98.5` logs as `HR=98.5`). Normalized values are
/// always written with 2 decimals.
#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    pub reading: Reading,
    pub normalized: NormalizedReading,
    pub status: Status,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HR={}, SpO2={}, NormHR={:.2}, NormSpO2={:.2}, STATUS={}",
            self.reading.heart_rate,
            self.reading.spo2,
            self.normalized.heart_rate,
            self.normalized.spo2,
            self.status
        )
    }
}

/// Destination for classification records
pub trait LogSink {
    fn append(&mut self, record: &LogRecord) -> Result<()>;
}

/// Text file sink, one record per line
pub struct TextLogSink {
    path: PathBuf,
}

impl TextLogSink {
    /// Create a new text sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl LogSink for TextLogSink {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Advisory only; other writers that skip the lock can still interleave
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        writeln!(writer, "{}", record)?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended record to {:?}", self.path);
        Ok(())
    }
}

/// In-memory sink, mostly useful for callers that display records themselves
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<LogRecord>,
}

impl LogSink for MemorySink {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
