use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use seqsub_cli::config::{FileConfig, RunOverrides, resolve_run_config};
use seqsub_core::{DEFAULT_ENTITY_ID, DestinationDescriptor, ReadPathExport, RunSummary, run};
use seqsub_ingest::parse_allow_list;
use seqsub_model::{Destination, FieldRequirements};
use seqsub_standards::load_biosample_requirements;

use crate::cli::{FieldsArgs, ReadPathExportArg, RunArgs};

pub fn run_pipeline(args: &RunArgs) -> Result<RunSummary> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let overrides = RunOverrides {
        specimen_table: args.specimen_table.clone(),
        biosample_schema: args.biosample_schema.clone(),
        static_metadata: args.static_metadata.clone(),
        column_map: args.column_map.clone(),
        entity_id: args.entity_id.clone(),
        destinations: args.destinations.clone(),
        cloud_uri: args.cloud_uri.clone(),
        read_path_export: args.read_path_export.map(|arg| match arg {
            ReadPathExportArg::Basename => ReadPathExport::Basename,
            ReadPathExportArg::Rewritten => ReadPathExport::Rewritten,
        }),
        output_dir: args.output_dir.clone(),
        samples: args
            .samples
            .as_deref()
            .map(|raw| parse_allow_list(raw, args.samples_delimiter)),
        dry_run: args.dry_run,
    };
    let config = resolve_run_config(overrides, file)?;

    let span = info_span!("seqsub", output_dir = %config.output_dir.display());
    let _guard = span.enter();
    info!(
        specimen_table = %config.specimen_table.display(),
        destinations = ?config.selection.optional(),
        dry_run = config.dry_run,
        "starting run"
    );
    run(&config).with_context(|| format!("process {}", config.specimen_table.display()))
}

/// Resolved field lists, one entry per destination.
pub fn run_fields(args: &FieldsArgs) -> Result<Vec<(Destination, FieldRequirements)>> {
    let entity_id = args.entity_id.as_deref().unwrap_or(DEFAULT_ENTITY_ID);
    let schema = match &args.biosample_schema {
        Some(path) => Some(
            load_biosample_requirements(path)
                .with_context(|| format!("load {}", path.display()))?,
        ),
        None => {
            warn!("no BioSample schema given; skipping BioSample fields");
            None
        }
    };

    let mut listings = Vec::new();
    for destination in Destination::ALL {
        if destination == Destination::BioSample && schema.is_none() {
            continue;
        }
        let descriptor = DestinationDescriptor::for_destination(destination, entity_id);
        let requirements = descriptor.resolve_requirements(schema.as_ref(), entity_id)?;
        listings.push((destination, requirements));
    }
    Ok(listings)
}
