//! Destination descriptors.
//!
//! Each destination is described by one [`DestinationDescriptor`] value and
//! processed by the same generic pipeline. The descriptor carries everything
//! that differs between destinations: where the field lists come from, the
//! amendments to those lists, derived fields, side outputs and the columns
//! that only exist for side outputs.

use tracing::warn;

use seqsub_model::{Destination, FieldRequirements};
use seqsub_standards::builtin_requirements;
use seqsub_transform::DerivedField;

use crate::error::{CoreError, Result};

/// BioSample field that is never mandatory.
pub const BIOSAMPLE_EXEMPT_FIELD: &str = "collection_date";

/// Column holding the FASTA source path for GISAID packaging.
pub const GISAID_FASTA_COLUMN: &str = "assembly_fasta";

/// Where a destination's mandatory and optional fields come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementSource {
    /// The BioSample attribute package document.
    SchemaDocument,
    /// Lists compiled into the binary.
    Builtin,
}

/// Extra files produced alongside a destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideOutput {
    None,
    /// `filepaths.csv`: one read-file name per line.
    ReadPaths,
    /// `gisaid_fasta_map.csv`: FASTA source → submission identifier.
    FastaMap,
}

impl SideOutput {
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            SideOutput::None => None,
            SideOutput::ReadPaths => Some("filepaths.csv"),
            SideOutput::FastaMap => Some("gisaid_fasta_map.csv"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DestinationDescriptor {
    pub destination: Destination,
    pub requirement_source: RequirementSource,
    /// Added to the mandatory list after loading.
    pub forced_mandatory: Vec<String>,
    /// Removed from the mandatory list after loading.
    pub exempt_mandatory: Vec<String>,
    pub derived: Vec<DerivedField>,
    pub side_output: SideOutput,
    /// Unprefixed columns kept in the destination table but dropped from the
    /// merged table.
    pub bookkeeping: Vec<String>,
}

impl DestinationDescriptor {
    /// The descriptor for a destination, given the specimen identifier column.
    pub fn for_destination(destination: Destination, entity_id: &str) -> Self {
        match destination {
            Destination::BioSample => Self {
                destination,
                requirement_source: RequirementSource::SchemaDocument,
                forced_mandatory: vec![entity_id.to_string(), "sample_name".to_string()],
                exempt_mandatory: vec![BIOSAMPLE_EXEMPT_FIELD.to_string()],
                derived: vec![DerivedField::isolate_name(
                    "isolate",
                    "isolate_prefix",
                    "country",
                    "sample_name",
                    "collection_date",
                )],
                side_output: SideOutput::None,
                bookkeeping: Vec::new(),
            },
            Destination::Sra => Self {
                destination,
                requirement_source: RequirementSource::Builtin,
                forced_mandatory: Vec::new(),
                exempt_mandatory: Vec::new(),
                derived: Vec::new(),
                side_output: SideOutput::ReadPaths,
                bookkeeping: Vec::new(),
            },
            Destination::Gisaid => Self {
                destination,
                requirement_source: RequirementSource::Builtin,
                forced_mandatory: Vec::new(),
                exempt_mandatory: Vec::new(),
                derived: vec![
                    DerivedField::isolate_name(
                        "sample_name",
                        "virus_prefix",
                        "country",
                        "fn",
                        "collection_date",
                    ),
                    DerivedField::location("covv_location", "continent", "country", "state", "county"),
                ],
                side_output: SideOutput::FastaMap,
                bookkeeping: vec![GISAID_FASTA_COLUMN.to_string()],
            },
            Destination::Shared => Self {
                destination,
                requirement_source: RequirementSource::Builtin,
                forced_mandatory: Vec::new(),
                exempt_mandatory: Vec::new(),
                derived: Vec::new(),
                side_output: SideOutput::None,
                bookkeeping: Vec::new(),
            },
        }
    }

    /// Resolves the field lists for this destination.
    ///
    /// `schema` is the parsed BioSample package and is required only for
    /// descriptors backed by [`RequirementSource::SchemaDocument`].
    pub fn resolve_requirements(
        &self,
        schema: Option<&FieldRequirements>,
        entity_id: &str,
    ) -> Result<FieldRequirements> {
        let mut requirements = match self.requirement_source {
            RequirementSource::SchemaDocument => {
                schema.cloned().ok_or(CoreError::MissingBioSampleSchema)?
            }
            RequirementSource::Builtin => {
                builtin_requirements(self.destination, entity_id).unwrap_or_default()
            }
        };
        for field in &self.forced_mandatory {
            requirements.push_mandatory(field.as_str());
        }
        for field in &self.exempt_mandatory {
            if !requirements.remove_mandatory(field) {
                warn!(
                    destination = %self.destination,
                    field = %field,
                    "field is not declared mandatory; submissions without it will probably be rejected"
                );
            }
        }
        Ok(requirements)
    }

    /// Bookkeeping columns as they appear in the prefixed table.
    pub fn prefixed_bookkeeping(&self) -> Vec<String> {
        self.bookkeeping
            .iter()
            .map(|column| self.destination.prefixed(column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biosample_amendments() {
        let schema = FieldRequirements::new(["collection_date", "host"], ["isolate"]);
        let descriptor = DestinationDescriptor::for_destination(Destination::BioSample, "entity:id");
        let requirements = descriptor
            .resolve_requirements(Some(&schema), "entity:id")
            .unwrap();
        assert_eq!(requirements.mandatory(), &["host", "entity:id", "sample_name"]);
        assert_eq!(requirements.optional(), &["isolate"]);
    }

    #[test]
    fn test_biosample_without_collection_date_does_not_fail() {
        let schema = FieldRequirements::new(["host"], Vec::<String>::new());
        let descriptor = DestinationDescriptor::for_destination(Destination::BioSample, "id");
        let requirements = descriptor.resolve_requirements(Some(&schema), "id").unwrap();
        assert!(!requirements.is_mandatory("collection_date"));
    }

    #[test]
    fn test_biosample_requires_schema() {
        let descriptor = DestinationDescriptor::for_destination(Destination::BioSample, "id");
        assert!(matches!(
            descriptor.resolve_requirements(None, "id"),
            Err(CoreError::MissingBioSampleSchema)
        ));
    }

    #[test]
    fn test_gisaid_bookkeeping_is_prefixed() {
        let descriptor = DestinationDescriptor::for_destination(Destination::Gisaid, "id");
        assert_eq!(descriptor.prefixed_bookkeeping(), vec!["gs-assembly_fasta"]);
        assert_eq!(descriptor.side_output.file_name(), Some("gisaid_fasta_map.csv"));
    }
}
