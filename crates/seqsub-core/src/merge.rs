//! Merge of the shared table with the selected destination tables.

use polars::prelude::{
    DataFrame, IntoLazy, JoinArgs, JoinType, SortMultipleOptions, col, when,
};
use tracing::{info, warn};

use seqsub_model::Destination;

use crate::error::{CoreError, Result};

/// Outer-joins the destination tables onto the shared table.
///
/// Tables are folded in priority order (BioSample, SRA, GISAID) whatever the
/// order of `tables`. The running key is the raw identifier column; after each
/// join it is filled from the destination's prefixed identifier so rows that
/// only exist in a destination still match the next one. The result is sorted
/// by the key, then the key, every prefixed identifier and the `drop_columns`
/// are removed.
pub fn merge_destination_tables(
    shared: &DataFrame,
    tables: &[(Destination, &DataFrame)],
    entity_id: &str,
    drop_columns: &[String],
) -> Result<DataFrame> {
    let mut ordered: Vec<&(Destination, &DataFrame)> = tables
        .iter()
        .filter(|(destination, _)| *destination != Destination::Shared)
        .collect();
    if ordered.is_empty() {
        return Err(CoreError::NoDestinationSelected);
    }
    ordered.sort_by_key(|(destination, _)| *destination);

    let mut merged = shared.clone().lazy();
    let mut key_columns = vec![entity_id.to_string()];
    for (destination, table) in ordered {
        let right_key = destination.prefixed(entity_id);
        if table.column(&right_key).is_err() {
            warn!(
                destination = %destination,
                column = %right_key,
                "destination table has no identifier column; leaving it out of the merge"
            );
            continue;
        }
        merged = merged
            .join(
                (*table).clone().lazy(),
                [col(entity_id)],
                [col(right_key.as_str())],
                JoinArgs::new(JoinType::Full),
            )
            .with_column(
                when(col(entity_id).is_null())
                    .then(col(right_key.as_str()))
                    .otherwise(col(entity_id))
                    .alias(entity_id),
            );
        key_columns.push(right_key);
    }

    let merged = merged
        .sort_by_exprs(
            [col(entity_id)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;
    let keep: Vec<String> = merged
        .get_column_names()
        .iter()
        .map(ToString::to_string)
        .filter(|name| !key_columns.contains(name) && !drop_columns.contains(name))
        .collect();
    let merged = merged.select(keep)?;
    info!(
        rows = merged.height(),
        columns = merged.width(),
        "merged destination tables"
    );
    Ok(merged)
}
