//! Per-rank output streams: the theta and dzA traces of the estimator,
//! the observed-statistics file and the simulated-statistics file.

use crate::types::*;
use std::fs::File;
use std::io::{BufWriter, Write};

/// An append-only whitespace table: a header line, then one row per outer
/// step. Rows are flushed as they are written so a killed run truncates
/// at a line boundary.
pub struct TraceWriter {
    path: String,
    writer: BufWriter<File>,
}

impl TraceWriter {
    /// Create the file and write the header `t <label>...`.
    pub fn create(path: String, labels: &[String]) -> Result<TraceWriter> {
        let file =
            File::create(&path).map_err(|e| format!("Cannot create {}: {}.", path, e))?;
        let mut writer = BufWriter::new(file);
        write!(writer, "t").map_err(|e| format!("Cannot write {}: {}.", path, e))?;
        for label in labels {
            write!(writer, " {}", label).map_err(|e| format!("Cannot write {}: {}.", path, e))?;
        }
        writeln!(writer).map_err(|e| format!("Cannot write {}: {}.", path, e))?;
        Ok(TraceWriter { path, writer })
    }

    pub fn write_row(&mut self, t: u64, values: &[f64]) -> Result<()> {
        write!(self.writer, "{}", t)
            .map_err(|e| format!("Cannot write {}: {}.", self.path, e))?;
        for value in values {
            write!(self.writer, " {}", value)
                .map_err(|e| format!("Cannot write {}: {}.", self.path, e))?;
        }
        writeln!(self.writer).map_err(|e| format!("Cannot write {}: {}.", self.path, e))?;
        self.writer
            .flush()
            .map_err(|e| format!("Cannot flush {}: {}.", self.path, e))
    }
}

/// Write a single labelled vector, e.g. the observed statistics.
pub fn write_vector_file(path: &str, labels: &[String], values: &[f64]) -> Result<()> {
    let file = File::create(path).map_err(|e| format!("Cannot create {}: {}.", path, e))?;
    let mut writer = BufWriter::new(file);
    let fail = |e: std::io::Error| format!("Cannot write {}: {}.", path, e);
    writeln!(writer, "{}", labels.join(" ")).map_err(fail)?;
    writeln!(
        writer,
        "{}",
        values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    )
    .map_err(fail)?;
    writer.flush().map_err(fail)
}
