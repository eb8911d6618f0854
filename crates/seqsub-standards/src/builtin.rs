//! Built-in field lists for destinations without a schema document.
//!
//! The entity-id column is always the first mandatory field; its name depends
//! on the specimen table and is supplied by the caller.

use seqsub_model::{Destination, FieldRequirements};

pub const SRA_MANDATORY: &[&str] = &[
    "sample_name",
    "library_name",
    "library_strategy",
    "library_source",
    "library_selection",
    "library_layout",
    "platform",
    "instrument_model",
    "design_description",
    "file_1",
    "file_location",
];

pub const SRA_OPTIONAL: &[&str] = &[
    "file_2",
    "file_3",
    "file_4",
    "assembly",
    "fasta_file",
    "biosample_accession",
];

pub const GISAID_MANDATORY: &[&str] = &[
    "sample_name",
    "covv_type",
    "covv_passage",
    "covv_location",
    "covv_host",
    "covv_sampling_strategy",
    "covv_gender",
    "covv_patient_age",
    "covv_seq_technology",
    "covv_assembly_method",
    "covv_coverage",
    "covv_orig_lab",
    "covv_orig_lab_addr",
    "covv_subm_lab",
    "covv_subm_lab_addr",
];

pub const GISAID_OPTIONAL: &[&str] = &[
    "covv_add_location",
    "covv_add_host_info",
    "covv_specimen",
    "covv_outbreak",
    "covv_last_vaccinated",
    "covv_treatment",
    "covv_provider_sample_id",
    "covv_consortium",
    "covv_subm_sample_id",
    "covv_patient_status",
    "covv_comment",
    "comment_type",
    "assembly_fasta",
];

pub const SHARED_MANDATORY: &[&str] = &["sequence_name", "authors", "collection_date"];

pub const SHARED_OPTIONAL: &[&str] = &["organism", "bioproject"];

/// Built-in requirements for a destination, or `None` for BioSample, whose
/// fields come from its package document.
pub fn builtin_requirements(destination: Destination, entity_id: &str) -> Option<FieldRequirements> {
    let (mandatory, optional) = match destination {
        Destination::BioSample => return None,
        Destination::Sra => (SRA_MANDATORY, SRA_OPTIONAL),
        Destination::Gisaid => (GISAID_MANDATORY, GISAID_OPTIONAL),
        Destination::Shared => (SHARED_MANDATORY, SHARED_OPTIONAL),
    };
    let mandatory = std::iter::once(entity_id).chain(mandatory.iter().copied());
    Some(FieldRequirements::new(mandatory, optional.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_leads_the_mandatory_list() {
        let requirements = builtin_requirements(Destination::Shared, "entity:test_id").unwrap();
        assert_eq!(
            requirements.mandatory(),
            &["entity:test_id", "sequence_name", "authors", "collection_date"]
        );
        assert_eq!(requirements.optional(), &["organism", "bioproject"]);
    }

    #[test]
    fn test_biosample_has_no_builtin_list() {
        assert!(builtin_requirements(Destination::BioSample, "id").is_none());
    }
}
