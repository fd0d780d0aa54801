//! Extracted page records

/// Value written for a configured field that no selector matched
pub const NOT_FOUND: &str = "N/A";

/// One structured row produced from a single page
///
/// Every configured field is present, in ruleset order; a field that no
/// selector matched holds `None` and is rendered as [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    url: String,
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    /// Creates a record for `url` with fields in the given order
    pub fn new(url: impl Into<String>, fields: Vec<(String, Option<String>)>) -> Self {
        Self {
            url: url.into(),
            fields,
        }
    }

    /// Source page URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Extracted text for `field`, or None if it was not found or not configured
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Extracted text for `field`, or [`NOT_FOUND`]
    pub fn display_value(&self, field: &str) -> &str {
        self.get(field).unwrap_or(NOT_FOUND)
    }

    /// Iterates `(field, value)` pairs in ruleset order
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Number of fields that matched
    pub fn matched_count(&self) -> usize {
        self.fields.iter().filter(|(_, value)| value.is_some()).count()
    }

    /// Export row: the source URL followed by `columns` in order
    pub fn row<'a>(&'a self, columns: &[String]) -> Vec<&'a str> {
        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(self.url.as_str());
        row.extend(columns.iter().map(|column| self.display_value(column)));
        row
    }
}
