//! Column renaming.

use std::collections::HashMap;

use polars::prelude::{Column, DataFrame};
use tracing::{debug, warn};

use seqsub_model::ColumnRename;

use crate::error::Result;

/// Rebuilds the frame with each column passed through `rename`.
///
/// When two columns end up with the same name the later one, in table order,
/// replaces the earlier one in place.
fn rebuild_columns<F>(df: &DataFrame, mut rename: F) -> Result<DataFrame>
where
    F: FnMut(&str) -> String,
{
    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let source = column.name().to_string();
        let target = rename(&source);
        let renamed = column.clone().with_name(target.as_str().into());
        if let Some(pos) = columns
            .iter()
            .position(|existing| existing.name().as_str() == target)
        {
            warn!(
                source = %source,
                target = %target,
                "column rename collides with an existing column; keeping the later column"
            );
            columns[pos] = renamed;
        } else {
            columns.push(renamed);
        }
    }
    Ok(DataFrame::new(columns)?)
}

/// Applies a destination's column renames to a copy of the frame.
///
/// Columns without an entry keep their name. The input frame is untouched.
pub fn apply_column_map(df: &DataFrame, renames: &[ColumnRename]) -> Result<DataFrame> {
    let lookup: HashMap<&str, &str> = renames
        .iter()
        .map(|rename| (rename.source.as_str(), rename.target.as_str()))
        .collect();
    let mut applied = 0usize;
    let renamed = rebuild_columns(df, |name| match lookup.get(name) {
        Some(target) => {
            applied += 1;
            (*target).to_string()
        }
        None => name.to_string(),
    })?;
    debug!(applied, available = renames.len(), "applied column map");
    Ok(renamed)
}

/// Prefixes every column name, e.g. `file_1` → `sra-file_1`.
pub fn prefix_columns(df: &DataFrame, prefix: &str) -> Result<DataFrame> {
    if prefix.is_empty() {
        return Ok(df.clone());
    }
    rebuild_columns(df, |name| format!("{prefix}{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqsub_common::frame_from_columns;

    fn frame(names: &[&str]) -> DataFrame {
        frame_from_columns(
            names
                .iter()
                .map(|name| (name.to_string(), vec![Some(format!("{name}-value"))]))
                .collect(),
        )
        .unwrap()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn test_unmapped_columns_keep_their_name() {
        let df = frame(&["read1", "host"]);
        let renames = vec![ColumnRename {
            source: "read1".to_string(),
            target: "file_1".to_string(),
        }];
        let renamed = apply_column_map(&df, &renames).unwrap();
        assert_eq!(names(&renamed), vec!["file_1", "host"]);
        assert_eq!(names(&df), vec!["read1", "host"]);
    }

    #[test]
    fn test_renames_are_simultaneous() {
        let df = frame(&["a", "b"]);
        let renames = vec![
            ColumnRename {
                source: "a".to_string(),
                target: "b".to_string(),
            },
            ColumnRename {
                source: "b".to_string(),
                target: "c".to_string(),
            },
        ];
        let renamed = apply_column_map(&df, &renames).unwrap();
        assert_eq!(names(&renamed), vec!["b", "c"]);
        let b = renamed.column("b").unwrap().str().unwrap();
        assert_eq!(b.get(0), Some("a-value"));
    }

    #[test]
    fn test_collision_keeps_later_column() {
        let df = frame(&["organism", "organism_name"]);
        let renames = vec![ColumnRename {
            source: "organism_name".to_string(),
            target: "organism".to_string(),
        }];
        let renamed = apply_column_map(&df, &renames).unwrap();
        assert_eq!(names(&renamed), vec!["organism"]);
        let organism = renamed.column("organism").unwrap().str().unwrap();
        assert_eq!(organism.get(0), Some("organism_name-value"));
    }

    #[test]
    fn test_prefix_columns() {
        let df = frame(&["file_1"]);
        assert_eq!(names(&prefix_columns(&df, "sra-").unwrap()), vec!["sra-file_1"]);
        assert_eq!(names(&prefix_columns(&df, "").unwrap()), vec!["file_1"]);
    }
}
