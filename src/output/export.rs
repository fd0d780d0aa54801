//! Record export encodings
//!
//! All three encodings share one tabular shape: a leading `url` column
//! followed by the ruleset's fields in declared order, one row per record.

use crate::output::record::Record;
use crate::{ExportError, ExportResult};
use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook};
use serde_json::{Map, Value};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Header of the source URL column
pub const URL_COLUMN: &str = "url";

/// Supported export encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// JSON array of objects
    Json,
    /// Excel workbook
    Xlsx,
}

impl ExportFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Builds `{prefix}_{YYYYMMDD_HHMMSS}.{ext}`
pub fn timestamped_path(prefix: &str, format: ExportFormat, now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}.{}",
        prefix,
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

/// Writes `records` to a timestamped file and returns its path
///
/// # Errors
///
/// * `ExportError::EmptyResult` - there is nothing to write
/// * any I/O or encoding error from the chosen writer
pub fn export_records(
    fields: &[String],
    records: &[Record],
    format: ExportFormat,
    prefix: &str,
) -> ExportResult<PathBuf> {
    if records.is_empty() {
        return Err(ExportError::EmptyResult);
    }

    let path = timestamped_path(prefix, format, Local::now());
    write_records(&path, fields, records, format)?;

    tracing::info!(
        "Exported {} records as {} to {}",
        records.len(),
        format,
        path.display()
    );

    Ok(path)
}

/// Writes `records` to `path` in the given format
pub fn write_records(
    path: &Path,
    fields: &[String],
    records: &[Record],
    format: ExportFormat,
) -> ExportResult<()> {
    match format {
        ExportFormat::Csv => write_csv(path, fields, records),
        ExportFormat::Json => write_json(path, fields, records),
        ExportFormat::Xlsx => write_xlsx(path, fields, records),
    }
}

fn header(fields: &[String]) -> Vec<&str> {
    let mut header = Vec::with_capacity(fields.len() + 1);
    header.push(URL_COLUMN);
    header.extend(fields.iter().map(String::as_str));
    header
}

fn write_csv(path: &Path, fields: &[String], records: &[Record]) -> ExportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header(fields))?;
    for record in records {
        writer.write_record(record.row(fields))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(path: &Path, fields: &[String], records: &[Record]) -> ExportResult<()> {
    let columns = header(fields);
    let rows: Vec<Value> = records
        .iter()
        .map(|record| {
            let object: Map<String, Value> = columns
                .iter()
                .zip(record.row(fields))
                .map(|(column, value)| (column.to_string(), Value::String(value.to_string())))
                .collect();
            Value::Object(object)
        })
        .collect();

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, fields: &[String], records: &[Record]) -> ExportResult<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in header(fields).into_iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &bold)?;
    }

    for (row, record) in records.iter().enumerate() {
        for (col, value) in record.row(fields).into_iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
