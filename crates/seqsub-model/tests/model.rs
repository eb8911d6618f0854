//! Integration tests for the seqsub data model.

use seqsub_model::{
    Destination, DestinationSelection, FieldRequirements, RepositoryColumnMap, StaticMetadataEntry,
};

#[test]
fn test_selection_parses_command_line_tags() {
    let selection = DestinationSelection::from_tags(["sra", " bs "]).unwrap();
    assert_eq!(
        selection.processing_order(),
        vec![Destination::BioSample, Destination::Sra, Destination::Shared]
    );
}

#[test]
fn test_selection_rejects_unknown_tags() {
    let err = DestinationSelection::from_tags(["bs", "ena"]).unwrap_err();
    assert!(err.to_string().contains("ena"));
}

#[test]
fn test_requirements_list_mandatory_before_optional() {
    let requirements = FieldRequirements::new(["entity:sample_id", "authors"], ["organism"]);
    let all: Vec<&str> = requirements.all_fields().collect();
    assert_eq!(all, vec!["entity:sample_id", "authors", "organism"]);
}

#[test]
fn test_column_map_keeps_latest_target_for_repeated_source() {
    let mut map = RepositoryColumnMap::new();
    map.insert(Destination::Gisaid, "host", "covv_host");
    map.insert(Destination::Gisaid, "host", "covv_add_host_info");
    let renames = map.renames_for(Destination::Gisaid);
    assert_eq!(renames.len(), 1);
    assert_eq!(renames[0].target, "covv_add_host_info");
}

#[test]
fn test_static_entry_with_unknown_tag_has_no_destination() {
    let entry = StaticMetadataEntry::new("ena", "center", "X");
    assert_eq!(entry.destination(), None);
}
