//! Static metadata injection.

use polars::prelude::DataFrame;
use tracing::debug;

use seqsub_common::string_column;
use seqsub_model::StaticMetadataEntry;

use crate::error::Result;

/// Apply a constant value to all rows of a column, creating or overwriting it.
pub fn apply_constant(df: &mut DataFrame, column_name: &str, value: &str) -> Result<usize> {
    let height = df.height();
    let column = string_column(column_name, vec![Some(value.to_string()); height]);
    df.with_column(column)?;
    Ok(height)
}

/// Writes each static metadata entry into a copy of the frame.
///
/// Entries are applied in declaration order, so a later entry for the same
/// key overrides an earlier one.
pub fn apply_static_metadata(
    df: &DataFrame,
    entries: &[&StaticMetadataEntry],
) -> Result<DataFrame> {
    let mut out = df.clone();
    for entry in entries {
        apply_constant(&mut out, &entry.key, &entry.value)?;
    }
    if !entries.is_empty() {
        debug!(entries = entries.len(), "applied static metadata");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqsub_common::frame_from_columns;

    fn frame() -> DataFrame {
        frame_from_columns(vec![(
            "id".to_string(),
            vec![Some("s1".to_string()), Some("s2".to_string())],
        )])
        .unwrap()
    }

    #[test]
    fn test_apply_constant() {
        let mut df = frame();
        let count = apply_constant(&mut df, "organism", "SARS-CoV-2").unwrap();
        assert_eq!(count, 2);
        let organism = df.column("organism").unwrap().str().unwrap();
        assert_eq!(organism.get(1), Some("SARS-CoV-2"));
    }

    #[test]
    fn test_later_entries_override() {
        let df = frame();
        let first = StaticMetadataEntry::new("gs", "covv_type", "alpha");
        let second = StaticMetadataEntry::new("gs", "covv_type", "betacoronavirus");
        let out = apply_static_metadata(&df, &[&first, &second]).unwrap();
        let column = out.column("covv_type").unwrap().str().unwrap();
        assert_eq!(column.get(0), Some("betacoronavirus"));
        assert!(df.column("covv_type").is_err());
    }

    #[test]
    fn test_existing_column_is_overwritten() {
        let df = frame();
        let entry = StaticMetadataEntry::new("gen", "id", "fixed");
        let out = apply_static_metadata(&df, &[&entry]).unwrap();
        assert_eq!(out.width(), 1);
        let ids = out.column("id").unwrap().str().unwrap();
        assert_eq!(ids.get(0), Some("fixed"));
    }
}
