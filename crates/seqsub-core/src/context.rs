//! Pipeline context for a seqsub run.
//!
//! [`PipelineContext`] bundles what every destination pipeline reads: the
//! identifier column, the destination selection, static metadata, the column
//! map, the parsed BioSample package and the SRA read-file options.

use seqsub_model::{DestinationSelection, FieldRequirements, RepositoryColumnMap, StaticMetadataEntry};

use crate::reads::ReadPathExport;

/// Default identifier column of a specimen table export.
pub const DEFAULT_ENTITY_ID: &str = "entity:sample_id";

#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Identifier column of the specimen table (e.g. `entity:sample_id`).
    pub entity_id: String,
    pub selection: DestinationSelection,
    pub static_metadata: Vec<StaticMetadataEntry>,
    pub column_map: RepositoryColumnMap,
    /// Parsed BioSample attribute package, when BioSample is selected.
    pub biosample_requirements: Option<FieldRequirements>,
    /// Prefix for SRA read-file values, e.g. `gs://bucket/`.
    pub cloud_uri: Option<String>,
    pub read_path_export: ReadPathExport,
}

impl PipelineContext {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            selection: DestinationSelection::default(),
            static_metadata: Vec::new(),
            column_map: RepositoryColumnMap::default(),
            biosample_requirements: None,
            cloud_uri: None,
            read_path_export: ReadPathExport::default(),
        }
    }

    pub fn with_selection(mut self, selection: DestinationSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_static_metadata(mut self, entries: Vec<StaticMetadataEntry>) -> Self {
        self.static_metadata = entries;
        self
    }

    pub fn with_column_map(mut self, column_map: RepositoryColumnMap) -> Self {
        self.column_map = column_map;
        self
    }

    pub fn with_biosample_requirements(mut self, requirements: FieldRequirements) -> Self {
        self.biosample_requirements = Some(requirements);
        self
    }

    pub fn with_cloud_uri(mut self, cloud_uri: Option<String>) -> Self {
        self.cloud_uri = cloud_uri;
        self
    }

    pub fn with_read_path_export(mut self, export: ReadPathExport) -> Self {
        self.read_path_export = export;
        self
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new(DEFAULT_ENTITY_ID)
    }
}
