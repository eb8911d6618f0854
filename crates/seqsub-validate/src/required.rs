//! Required-field check, row exclusion and column projection.

use polars::prelude::{BooleanChunked, Column, DataFrame, NewChunkedArray};
use tracing::{debug, info, warn};

use seqsub_common::{column_strings, is_blank, string_column};
use seqsub_model::{Destination, ExcludedSample, ExclusionReport, FieldRequirements};
use seqsub_transform::prefix_columns;

use crate::error::Result;

/// Outcome of validating one destination table.
#[derive(Debug, Clone)]
pub struct RequiredFieldCheck {
    /// Filtered, projected and prefixed table.
    pub table: DataFrame,
    pub report: ExclusionReport,
    /// Rows seen before exclusion.
    pub input_rows: usize,
}

impl RequiredFieldCheck {
    pub fn kept_rows(&self) -> usize {
        self.table.height()
    }
}

/// Turns empty and whitespace-only cells into nulls.
///
/// Non-blank text keeps its exact value, surrounding whitespace included.
pub fn normalize_blanks(df: &DataFrame) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for name in df.get_column_names() {
        let values = column_strings(df, name)?
            .into_iter()
            .map(|value| if is_blank(value.as_deref()) { None } else { value })
            .collect();
        columns.push(string_column(name, values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Checks a destination table against its field requirements.
///
/// Steps, in order: blank normalization, schema-gap detection, row exclusion,
/// projection onto declared fields (table column order) and prefixing with the
/// destination tag. Excluded rows are keyed by their lower-cased identifier.
pub fn validate_required(
    df: &DataFrame,
    requirements: &FieldRequirements,
    entity_id: &str,
    destination: Destination,
) -> Result<RequiredFieldCheck> {
    let normalized = normalize_blanks(df)?;
    let mut report = ExclusionReport::new(destination);

    let mut missing: Vec<String> = requirements
        .mandatory()
        .iter()
        .filter(|field| normalized.column(field).is_err())
        .cloned()
        .collect();
    missing.sort();
    if !missing.is_empty() {
        warn!(
            destination = %destination,
            missing = ?missing,
            "mandatory fields absent from table"
        );
    }
    report.missing_mandatory = missing;

    let present_mandatory: Vec<String> = normalized
        .get_column_names()
        .into_iter()
        .filter(|name| requirements.is_mandatory(name))
        .map(|name| name.to_string())
        .collect();
    let mandatory_values = present_mandatory
        .iter()
        .map(|name| column_strings(&normalized, name))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let ids = if normalized.column(entity_id).is_ok() {
        column_strings(&normalized, entity_id)?
    } else {
        vec![None; normalized.height()]
    };

    let mut keep = Vec::with_capacity(normalized.height());
    for (row, id) in ids.iter().enumerate() {
        let blank_fields: Vec<String> = present_mandatory
            .iter()
            .zip(&mandatory_values)
            .filter(|(_, values)| values[row].is_none())
            .map(|(name, _)| name.clone())
            .collect();
        if blank_fields.is_empty() {
            keep.push(true);
        } else {
            let entity_id = id.as_deref().unwrap_or_default().to_lowercase();
            debug!(
                destination = %destination,
                entity_id = %entity_id,
                blank = ?blank_fields,
                "excluding row with blank mandatory fields"
            );
            report.excluded.push(ExcludedSample {
                entity_id,
                blank_fields,
            });
            keep.push(false);
        }
    }
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let filtered = normalized.filter(&mask)?;

    let declared: Vec<String> = filtered
        .get_column_names()
        .into_iter()
        .filter(|name| requirements.is_declared(name))
        .map(|name| name.to_string())
        .collect();
    let projected = filtered.select(declared)?;
    let table = prefix_columns(&projected, destination.column_prefix())?;

    info!(
        destination = %destination,
        input_rows = df.height(),
        kept_rows = table.height(),
        excluded = report.excluded_count(),
        columns = table.width(),
        "validated destination table"
    );
    Ok(RequiredFieldCheck {
        table,
        report,
        input_rows: df.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqsub_common::frame_from_columns;

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_normalize_blanks() {
        let df = frame_from_columns(vec![(
            "a".to_string(),
            vec![cell(""), cell("  "), cell(" x "), None],
        )])
        .unwrap();
        let out = normalize_blanks(&df).unwrap();
        let values = column_strings(&out, "a").unwrap();
        assert_eq!(values, vec![None, None, cell(" x "), None]);
    }

    #[test]
    fn test_missing_identifier_column_excludes_nothing_by_itself() {
        let df = frame_from_columns(vec![("authors".to_string(), vec![cell("Doe")])]).unwrap();
        let requirements = FieldRequirements::new(["id", "authors"], Vec::<String>::new());
        let check = validate_required(&df, &requirements, "id", Destination::Shared).unwrap();
        assert_eq!(check.report.missing_mandatory, vec!["id"]);
        assert_eq!(check.kept_rows(), 1);
    }
}
