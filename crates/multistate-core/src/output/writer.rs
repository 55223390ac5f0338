//! History Writer
//!
//! Streams history entries as JSON lines or CSV.

use clap::ValueEnum;
use std::io::{BufWriter, Write};
use thiserror::Error;

use multistate_events::{History, HistoryEntry};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HistoryFormat {
    /// One JSON object per line
    #[default]
    Jsonl,
    /// `individual,state,time` with a header row
    Csv,
}

/// Errors writing history.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Writes history entries to any sink.
pub struct HistoryWriter {
    writer: Option<BufWriter<Box<dyn Write>>>,
    format: HistoryFormat,
    entry_count: u64,
}

impl HistoryWriter {
    pub fn new(sink: Box<dyn Write>, format: HistoryFormat) -> Self {
        Self {
            writer: Some(BufWriter::new(sink)),
            format,
            entry_count: 0,
        }
    }

    /// Create a writer that discards entries (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            format: HistoryFormat::Jsonl,
            entry_count: 0,
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    /// Write a single entry, emitting the CSV header first if needed.
    pub fn write(&mut self, entry: &HistoryEntry) -> Result<(), OutputError> {
        let first = self.entry_count == 0;
        self.entry_count += 1;
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        match self.format {
            HistoryFormat::Jsonl => {
                serde_json::to_writer(&mut *writer, entry)?;
                writeln!(writer)?;
            }
            HistoryFormat::Csv => {
                if first {
                    writeln!(writer, "individual,state,time")?;
                }
                writeln!(
                    writer,
                    "{},{},{}",
                    entry.individual.index(),
                    entry.state.index(),
                    entry.time.value()
                )?;
            }
        }
        Ok(())
    }

    pub fn write_all(&mut self, history: &History) -> Result<(), OutputError> {
        for entry in history {
            self.write(entry)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), OutputError> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for HistoryWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush history writer: {}", e);
        }
    }
}
