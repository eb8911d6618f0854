//! End-to-end run: load inputs, process destinations, merge and write.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use seqsub_ingest::{IngestOptions, read_repository_column_map, read_specimen_table, read_static_metadata};
use seqsub_model::{Destination, DestinationSelection, ExclusionReport};
use seqsub_output::{
    ensure_dir, write_exclusion_report_json, write_frame_csv, write_pair_list, write_value_list,
};
use seqsub_standards::load_biosample_requirements;

use crate::context::{DEFAULT_ENTITY_ID, PipelineContext};
use crate::descriptor::DestinationDescriptor;
use crate::error::{CoreError, Result};
use crate::merge::merge_destination_tables;
use crate::pipeline::{DestinationOutcome, SideFile, SideFileContent, process_destination};
use crate::reads::ReadPathExport;

pub const MERGED_FILE_NAME: &str = "merged_metadata.csv";
pub const EXCLUSION_REPORT_FILE_NAME: &str = "excluded_samples.json";

/// Inputs and options of one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub specimen_table: PathBuf,
    /// Required when BioSample is selected.
    pub biosample_schema: Option<PathBuf>,
    pub static_metadata: PathBuf,
    pub column_map: PathBuf,
    pub entity_id: String,
    pub selection: DestinationSelection,
    pub cloud_uri: Option<String>,
    pub read_path_export: ReadPathExport,
    pub output_dir: PathBuf,
    /// Identifiers to keep; every row when `None`.
    pub allow_list: Option<Vec<String>>,
    /// Run every stage but write nothing.
    pub dry_run: bool,
}

impl RunConfig {
    pub fn new(
        specimen_table: impl Into<PathBuf>,
        static_metadata: impl Into<PathBuf>,
        column_map: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            specimen_table: specimen_table.into(),
            biosample_schema: None,
            static_metadata: static_metadata.into(),
            column_map: column_map.into(),
            entity_id: DEFAULT_ENTITY_ID.to_string(),
            selection: DestinationSelection::all(),
            cloud_uri: None,
            read_path_export: ReadPathExport::default(),
            output_dir: output_dir.into(),
            allow_list: None,
            dry_run: false,
        }
    }
}

/// Row counts for one destination.
#[derive(Debug, Clone)]
pub struct DestinationSummary {
    pub destination: Destination,
    pub input_rows: usize,
    pub kept_rows: usize,
    pub excluded_rows: usize,
    pub missing_mandatory: Vec<String>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub destinations: Vec<DestinationSummary>,
    pub merged_rows: usize,
    pub merged_columns: usize,
    pub reports: Vec<ExclusionReport>,
    /// Every file written, in write order.
    pub written: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Loads the inputs named by the config into a pipeline context.
///
/// The BioSample package is parsed first so a bad document fails the run
/// before anything else is read.
pub fn load_context(config: &RunConfig) -> Result<(DataFrame, PipelineContext)> {
    if config.selection.is_empty() {
        return Err(CoreError::NoDestinationSelected);
    }
    let mut ctx = PipelineContext::new(config.entity_id.clone())
        .with_selection(config.selection.clone())
        .with_cloud_uri(config.cloud_uri.clone())
        .with_read_path_export(config.read_path_export);
    if config.selection.contains(Destination::BioSample) {
        let path = config
            .biosample_schema
            .as_deref()
            .ok_or(CoreError::MissingBioSampleSchema)?;
        ctx = ctx.with_biosample_requirements(load_biosample_requirements(path)?);
    }
    ctx = ctx
        .with_static_metadata(read_static_metadata(&config.static_metadata)?)
        .with_column_map(read_repository_column_map(&config.column_map)?);

    let options =
        IngestOptions::new(config.entity_id.clone()).with_allow_list(config.allow_list.clone());
    let specimen = read_specimen_table(&config.specimen_table, &options)?;
    Ok((specimen, ctx))
}

fn write_side_file(side_file: &SideFile, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(side_file.file_name);
    if side_file.is_empty() {
        warn!(file = side_file.file_name, "side file has no entries");
    }
    match &side_file.content {
        SideFileContent::Lines(lines) => {
            write_value_list(lines.iter().map(|line| Some(line.as_str())), &path)?;
        }
        SideFileContent::Pairs(pairs) => {
            write_pair_list(
                pairs
                    .iter()
                    .map(|(left, right)| (Some(left.as_str()), Some(right.as_str()))),
                &path,
            )?;
        }
    }
    Ok(path)
}

/// Runs every selected destination and the merge, writing outputs as they
/// are produced.
///
/// Tables are written in processing order (BioSample, SRA, GISAID, shared)
/// followed by the merged table and the exclusion report. A failure leaves
/// earlier files in place.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let span = info_span!("run", entity_id = %config.entity_id);
    let _guard = span.enter();

    let (specimen, ctx) = load_context(config)?;
    if !config.dry_run {
        ensure_dir(&config.output_dir)?;
    }

    let mut outcomes: Vec<DestinationOutcome> = Vec::new();
    let mut destinations = Vec::new();
    let mut written = Vec::new();
    for destination in ctx.selection.processing_order() {
        let descriptor = DestinationDescriptor::for_destination(destination, &ctx.entity_id);
        let outcome = process_destination(&specimen, &descriptor, &ctx)?;

        let mut output = None;
        if !config.dry_run {
            let path = config.output_dir.join(destination.table_file_name());
            write_frame_csv(&outcome.table, &path)?;
            written.push(path.clone());
            output = Some(path);
            if let Some(side_file) = &outcome.side_file {
                written.push(write_side_file(side_file, &config.output_dir)?);
                info!(
                    destination = %destination,
                    file = side_file.file_name,
                    entries = side_file.len(),
                    "wrote side file"
                );
            }
        }
        destinations.push(DestinationSummary {
            destination,
            input_rows: outcome.input_rows,
            kept_rows: outcome.kept_rows(),
            excluded_rows: outcome.report.excluded_count(),
            missing_mandatory: outcome.report.missing_mandatory.clone(),
            output,
        });
        outcomes.push(outcome);
    }

    let (shared, optional): (Vec<&DestinationOutcome>, Vec<&DestinationOutcome>) = outcomes
        .iter()
        .partition(|outcome| outcome.destination == Destination::Shared);
    let shared_table = shared
        .first()
        .map(|outcome| &outcome.table)
        .ok_or(CoreError::NoDestinationSelected)?;
    let tables: Vec<(Destination, &DataFrame)> = optional
        .iter()
        .map(|outcome| (outcome.destination, &outcome.table))
        .collect();
    let drop_columns: Vec<String> = optional
        .iter()
        .flat_map(|outcome| outcome.bookkeeping.iter().cloned())
        .collect();
    let merged = merge_destination_tables(shared_table, &tables, &ctx.entity_id, &drop_columns)?;

    let reports: Vec<ExclusionReport> = outcomes.iter().map(|outcome| outcome.report.clone()).collect();
    if !config.dry_run {
        let merged_path = config.output_dir.join(MERGED_FILE_NAME);
        write_frame_csv(&merged, &merged_path)?;
        written.push(merged_path);
        let report_path = config.output_dir.join(EXCLUSION_REPORT_FILE_NAME);
        write_exclusion_report_json(&reports, &report_path)?;
        written.push(report_path);
    }

    info!(
        destinations = destinations.len(),
        merged_rows = merged.height(),
        files = written.len(),
        dry_run = config.dry_run,
        "run complete"
    );
    Ok(RunSummary {
        destinations,
        merged_rows: merged.height(),
        merged_columns: merged.width(),
        reports,
        written,
        dry_run: config.dry_run,
    })
}
