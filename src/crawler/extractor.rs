//! Selector-based record extraction
//!
//! Each field of the ruleset has an ordered list of CSS selectors. The first
//! selector whose first match carries non-empty text wins; a field with no
//! winner is recorded as not found. A page where no field matched yields no
//! record at all.

use crate::config::SelectorRuleset;
use crate::output::Record;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone)]
struct FieldRule {
    name: String,
    selectors: Vec<Selector>,
}

/// Compiled selector ruleset
#[derive(Debug, Clone)]
pub struct Extractor {
    rules: Vec<FieldRule>,
}

impl Extractor {
    /// Compiles every selector of the ruleset
    ///
    /// Selectors that fail to parse are dropped with a warning and behave as
    /// if they never matched; the other selectors of the field still apply.
    pub fn new(ruleset: &SelectorRuleset) -> Self {
        let rules = ruleset
            .iter()
            .map(|(name, selectors)| FieldRule {
                name: name.to_string(),
                selectors: selectors
                    .iter()
                    .filter_map(|raw| match Selector::parse(raw) {
                        Ok(selector) => Some(selector),
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring malformed selector '{}' for field '{}': {:?}",
                                raw,
                                name,
                                e
                            );
                            None
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { rules }
    }

    /// Field names in ruleset order
    pub fn field_names(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.name.clone()).collect()
    }

    /// Returns true if the ruleset has no fields
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Extracts one record from a parsed page
    ///
    /// Returns None when not a single field matched.
    pub fn extract(&self, document: &Html, url: &str) -> Option<Record> {
        let mut any_found = false;

        let fields = self
            .rules
            .iter()
            .map(|rule| {
                let value = rule
                    .selectors
                    .iter()
                    .find_map(|selector| first_text(document, selector));
                any_found |= value.is_some();
                (rule.name.clone(), value)
            })
            .collect();

        if !any_found {
            return None;
        }

        Some(Record::new(url, fields))
    }
}

/// Text of the first element matching `selector`, if it is non-empty
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Visible text of an element with whitespace runs collapsed
///
/// Text nodes are joined with a single space, so `Widget <b>Pro</b>` reads
/// `Widget Pro` rather than the concatenated `WidgetPro`.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
