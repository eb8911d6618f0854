//! Per-destination processing and merge for seqsub.
//!
//! - **descriptor**: what differs between BioSample, SRA, GISAID and shared
//! - **pipeline**: the one execution path every destination goes through
//! - **reads**: SRA read-file normalization and export
//! - **merge**: outer-join fold of the destination tables
//! - **run**: loading inputs and writing outputs for a whole run

pub mod context;
pub mod descriptor;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod reads;
pub mod run;

pub use context::{DEFAULT_ENTITY_ID, PipelineContext};
pub use descriptor::{DestinationDescriptor, RequirementSource, SideOutput};
pub use error::{CoreError, Result};
pub use merge::merge_destination_tables;
pub use pipeline::{DestinationOutcome, SideFile, SideFileContent, process_destination};
pub use reads::{ReadFiles, ReadPathExport, process_read_files, read_file_basename};
pub use run::{
    DestinationSummary, EXCLUSION_REPORT_FILE_NAME, MERGED_FILE_NAME, RunConfig, RunSummary,
    load_context, run,
};
