//! Generic per-destination pipeline.
//!
//! # Step order
//!
//! 1. copy the specimen table and apply the destination's column renames
//! 2. write static metadata for the destination
//! 3. compute derived fields whose prerequisites are present
//! 4. validate mandatory fields, project onto declared fields and prefix
//! 5. build side outputs (SRA read paths, GISAID FASTA map)

use polars::prelude::DataFrame;
use tracing::{debug, info};

use seqsub_common::column_strings;
use seqsub_model::{Destination, ExclusionReport, StaticMetadataEntry};
use seqsub_transform::{apply_column_map, apply_derived_fields, apply_static_metadata};
use seqsub_validate::validate_required;

use crate::context::PipelineContext;
use crate::descriptor::{DestinationDescriptor, GISAID_FASTA_COLUMN, SideOutput};
use crate::error::Result;
use crate::reads::process_read_files;

/// Content of a side file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideFileContent {
    /// One value per line.
    Lines(Vec<String>),
    /// Two values per line.
    Pairs(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideFile {
    pub file_name: &'static str,
    pub content: SideFileContent,
}

impl SideFile {
    pub fn len(&self) -> usize {
        match &self.content {
            SideFileContent::Lines(lines) => lines.len(),
            SideFileContent::Pairs(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of running one destination through the pipeline.
#[derive(Debug, Clone)]
pub struct DestinationOutcome {
    pub destination: Destination,
    /// Filtered, prefixed destination table.
    pub table: DataFrame,
    pub report: ExclusionReport,
    pub input_rows: usize,
    pub side_file: Option<SideFile>,
    /// Prefixed columns to drop from the merged table.
    pub bookkeeping: Vec<String>,
}

impl DestinationOutcome {
    pub fn kept_rows(&self) -> usize {
        self.table.height()
    }
}

/// Runs one destination over its own copy of the specimen table.
pub fn process_destination(
    specimen: &DataFrame,
    descriptor: &DestinationDescriptor,
    ctx: &PipelineContext,
) -> Result<DestinationOutcome> {
    let destination = descriptor.destination;
    let requirements =
        descriptor.resolve_requirements(ctx.biosample_requirements.as_ref(), &ctx.entity_id)?;
    debug!(
        destination = %destination,
        mandatory = requirements.mandatory().len(),
        optional = requirements.optional().len(),
        "resolved field requirements"
    );

    let renamed = apply_column_map(specimen, ctx.column_map.renames_for(destination))?;
    let entries = StaticMetadataEntry::for_destination(&ctx.static_metadata, destination);
    let with_static = apply_static_metadata(&renamed, &entries)?;
    let derived = apply_derived_fields(&with_static, &descriptor.derived)?;
    let check = validate_required(&derived, &requirements, &ctx.entity_id, destination)?;

    let mut table = check.table;
    let side_file = match descriptor.side_output {
        SideOutput::None => None,
        SideOutput::ReadPaths => {
            let files =
                process_read_files(&table, ctx.cloud_uri.as_deref(), ctx.read_path_export)?;
            table = files.table;
            descriptor.side_output.file_name().map(|file_name| SideFile {
                file_name,
                content: SideFileContent::Lines(files.export),
            })
        }
        SideOutput::FastaMap => fasta_map(&table)?.and_then(|pairs| {
            descriptor.side_output.file_name().map(|file_name| SideFile {
                file_name,
                content: SideFileContent::Pairs(pairs),
            })
        }),
    };

    info!(
        destination = %destination,
        input_rows = check.input_rows,
        kept_rows = table.height(),
        excluded = check.report.excluded_count(),
        missing = check.report.missing_mandatory.len(),
        "processed destination"
    );
    Ok(DestinationOutcome {
        destination,
        table,
        report: check.report,
        input_rows: check.input_rows,
        side_file,
        bookkeeping: descriptor.prefixed_bookkeeping(),
    })
}

/// FASTA source → submission identifier pairs from a prefixed GISAID table.
///
/// Returns `None` when the table has no FASTA source column.
fn fasta_map(table: &DataFrame) -> Result<Option<Vec<(String, String)>>> {
    let source = Destination::Gisaid.prefixed(GISAID_FASTA_COLUMN);
    let target = Destination::Gisaid.prefixed("sample_name");
    if table.column(&source).is_err() || table.column(&target).is_err() {
        debug!(source = %source, target = %target, "no FASTA map columns; skipping map");
        return Ok(None);
    }
    let pairs = column_strings(table, &source)?
        .into_iter()
        .zip(column_strings(table, &target)?)
        .filter_map(|(fasta, name)| Some((fasta?, name?)))
        .collect();
    Ok(Some(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_file_counts_entries() {
        let lines = SideFile {
            file_name: "filepaths.csv",
            content: SideFileContent::Lines(vec!["a.fq".to_string(), "b.fq".to_string()]),
        };
        assert_eq!(lines.len(), 2);

        let pairs = SideFile {
            file_name: "gisaid_fasta_map.csv",
            content: SideFileContent::Pairs(Vec::new()),
        };
        assert!(pairs.is_empty());
    }
}
