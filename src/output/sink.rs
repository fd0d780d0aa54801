use crate::output::export::{export_records, ExportFormat};
use crate::output::record::Record;
use crate::ExportResult;
use std::path::PathBuf;

/// Append-only, ordered collection of extracted records
///
/// The sink knows the ruleset's field order so that every export has the
/// same column layout regardless of which fields a given page matched.
#[derive(Debug, Clone, Default)]
pub struct ResultSink {
    fields: Vec<String>,
    records: Vec<Record>,
}

impl ResultSink {
    /// Creates an empty sink whose exports use `fields` as columns
    pub fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            records: Vec::new(),
        }
    }

    /// Appends a record; records are never modified after this
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Records in extraction order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record has been collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Writes a snapshot of all records to `{prefix}_{timestamp}.{ext}`
    ///
    /// Returns the written path. Fails with `ExportError::EmptyResult` when
    /// there are no records; I/O and encoding failures are returned, never
    /// raised.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shop_harvest::output::{ExportFormat, Record, ResultSink};
    ///
    /// let mut sink = ResultSink::new(vec!["price".to_string()]);
    /// sink.push(Record::new("http://shop.test/a", vec![("price".into(), Some("$9".into()))]));
    /// match sink.export(ExportFormat::Csv, "products") {
    ///     Ok(path) => println!("Saved to {}", path.display()),
    ///     Err(e) => eprintln!("Export failed: {}", e),
    /// }
    /// ```
    pub fn export(&self, format: ExportFormat, prefix: &str) -> ExportResult<PathBuf> {
        export_records(&self.fields, &self.records, format, prefix)
    }
}
