//! Selector ruleset loading
//!
//! A selector file is a JSON document whose top-level `default` object maps
//! each output field to an ordered list of CSS selectors:
//!
//! ```json
//! {
//!   "default": {
//!     "product_name": ["h1.product-title", "h1"],
//!     "price": [".price .amount", ".price"]
//!   }
//! }
//! ```

use crate::output::URL_COLUMN;
use crate::ConfigError;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

/// Key of the ruleset used for every page
const DEFAULT_RULESET_KEY: &str = "default";

/// Immutable mapping from field name to an ordered list of selectors
///
/// Field order is the order in which the fields were declared in the file,
/// and is the column order of every export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorRuleset {
    fields: Vec<(String, Vec<String>)>,
}

impl SelectorRuleset {
    /// Builds a ruleset from `(field, selectors)` pairs, keeping their order
    pub fn new<I, F, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (F, Vec<S>)>,
        F: Into<String>,
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, selectors)| {
                    (name.into(), selectors.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// Loads a ruleset from a JSON selector file
    ///
    /// A missing file is not an error: it yields an empty ruleset, and a crawl
    /// with an empty ruleset still follows links but produces no records.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Selector file {} not found, crawling without extraction rules",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parses a ruleset from JSON text
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let document: Value = serde_json::from_str(content)?;

        let Some(rules) = document.get(DEFAULT_RULESET_KEY) else {
            return Ok(Self::default());
        };

        let rules = rules.as_object().ok_or_else(|| {
            ConfigError::Validation(format!("'{}' must be a JSON object", DEFAULT_RULESET_KEY))
        })?;

        let mut fields = Vec::with_capacity(rules.len());
        for (name, selectors) in rules {
            if name.eq_ignore_ascii_case(URL_COLUMN) {
                return Err(ConfigError::Validation(format!(
                    "field '{}' clashes with the '{}' export column",
                    name, URL_COLUMN
                )));
            }
            let list = match selectors {
                Value::Array(items) => items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or_else(|| {
                            ConfigError::Validation(format!(
                                "selectors for field '{}' must be strings",
                                name
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                Value::String(single) => vec![single.clone()],
                _ => {
                    return Err(ConfigError::Validation(format!(
                        "field '{}' must map to a list of selectors",
                        name
                    )))
                }
            };
            fields.push((name.clone(), list));
        }

        Ok(Self { fields })
    }

    /// Field names in declared order
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Iterates `(field, selectors)` in declared order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, selectors)| (name.as_str(), selectors.as_slice()))
    }

    /// Number of configured fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is configured
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
