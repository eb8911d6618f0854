//! Exclusion reports produced by required-field validation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::destination::Destination;

/// A row dropped from a destination table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedSample {
    /// Row identifier, lower-cased.
    pub entity_id: String,
    /// Mandatory columns that were blank for this row, in table column order.
    pub blank_fields: Vec<String>,
}

/// Schema-level and row-level gaps found for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionReport {
    pub destination: Destination,
    /// Mandatory fields that are not columns of the table at all.
    pub missing_mandatory: Vec<String>,
    pub excluded: Vec<ExcludedSample>,
}

impl ExclusionReport {
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            missing_mandatory: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Columns with at least one blank among the excluded rows.
    pub fn excluded_fields(&self) -> BTreeSet<&str> {
        self.excluded
            .iter()
            .flat_map(|sample| sample.blank_fields.iter().map(String::as_str))
            .collect()
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    pub fn is_clean(&self) -> bool {
        self.missing_mandatory.is_empty() && self.excluded.is_empty()
    }
}
