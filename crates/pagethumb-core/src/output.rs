//! Run report output in JSON or JSON Lines.

use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::types::ThumbnailRecord;

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// One JSON array of records
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

/// Serializes per-entity records for the run report.
pub struct ReportWriter<W: Write> {
    writer: W,
    format: ReportFormat,
    records_written: usize,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self {
            writer,
            format,
            records_written: 0,
        }
    }

    /// Write all records: a pretty JSON array, or one line per record.
    pub fn write_records(&mut self, records: &[ThumbnailRecord]) -> Result<()> {
        match self.format {
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, records)?;
                writeln!(self.writer)?;
                self.records_written += records.len();
            }
            ReportFormat::JsonLines => {
                for record in records {
                    self.write_line(record)?;
                }
            }
        }
        Ok(())
    }

    fn write_line<T: Serialize>(&mut self, item: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, item)?;
        writeln!(self.writer)?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
