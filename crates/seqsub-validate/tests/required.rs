//! Tests for required-field validation.

use std::collections::BTreeSet;

use polars::prelude::*;
use proptest::prelude::*;
use seqsub_model::{Destination, FieldRequirements};
use seqsub_validate::validate_required;

const ID: &str = "entity:sample_id";

fn shared_requirements() -> FieldRequirements {
    FieldRequirements::new(
        [ID, "sequence_name", "authors", "collection_date"],
        ["organism", "bioproject"],
    )
}

#[test]
fn test_blank_author_row_is_excluded() {
    let df = DataFrame::new(vec![
        Series::new(ID.into(), vec!["S1", "S2"]).into(),
        Series::new("sequence_name".into(), vec!["seq1", "seq2"]).into(),
        Series::new("authors".into(), vec!["Doe", ""]).into(),
        Series::new("collection_date".into(), vec!["2021-01-01", "2021-01-02"]).into(),
    ])
    .unwrap();

    let check = validate_required(&df, &shared_requirements(), ID, Destination::Shared).unwrap();

    assert_eq!(check.input_rows, 2);
    assert_eq!(check.kept_rows(), 1);
    let ids = check.table.column(ID).unwrap().str().unwrap();
    assert_eq!(ids.get(0), Some("S1"));
    assert_eq!(check.report.excluded.len(), 1);
    assert_eq!(check.report.excluded[0].entity_id, "s2");
    assert_eq!(check.report.excluded[0].blank_fields, vec!["authors"]);
    assert!(check.report.missing_mandatory.is_empty());
}

#[test]
fn test_schema_gap_does_not_drop_rows() {
    let df = DataFrame::new(vec![
        Series::new(ID.into(), vec!["S1"]).into(),
        Series::new("sequence_name".into(), vec!["seq1"]).into(),
    ])
    .unwrap();

    let check = validate_required(&df, &shared_requirements(), ID, Destination::Shared).unwrap();

    assert_eq!(check.kept_rows(), 1);
    assert_eq!(
        check.report.missing_mandatory,
        vec!["authors", "collection_date"]
    );
}

#[test]
fn test_projection_keeps_declared_columns_in_table_order() {
    let df = DataFrame::new(vec![
        Series::new("bioproject".into(), vec!["PRJ1"]).into(),
        Series::new(ID.into(), vec!["S1"]).into(),
        Series::new("internal_note".into(), vec!["skip me"]).into(),
        Series::new("file_1".into(), vec!["r1.fastq.gz"]).into(),
    ])
    .unwrap();
    let requirements = FieldRequirements::new([ID, "file_1"], ["bioproject", "file_2"]);

    let check = validate_required(&df, &requirements, ID, Destination::Sra).unwrap();

    let names: Vec<String> = check
        .table
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec!["sra-bioproject", "sra-entity:sample_id", "sra-file_1"]
    );
}

#[test]
fn test_present_optional_field_survives_with_value() {
    let df = DataFrame::new(vec![
        Series::new(ID.into(), vec!["S1", "S2"]).into(),
        Series::new("sequence_name".into(), vec!["seq1", "seq2"]).into(),
        Series::new("authors".into(), vec!["Doe", "Roe"]).into(),
        Series::new("collection_date".into(), vec!["2021-01-01", "2021-01-02"]).into(),
        Series::new("organism".into(), vec![Some(" SARS-CoV-2 "), Some("  ")]).into(),
    ])
    .unwrap();

    let check = validate_required(&df, &shared_requirements(), ID, Destination::Shared).unwrap();

    let organism = check.table.column("organism").unwrap().str().unwrap();
    assert_eq!(organism.get(0), Some(" SARS-CoV-2 "));
    assert_eq!(organism.get(1), None);
}

fn cell_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("  ".to_string())),
        "[a-z]{1,4}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn test_excluded_fields_are_exactly_the_blank_mandatory_columns(
        rows in prop::collection::vec(prop::collection::vec(cell_strategy(), 3), 0..12)
    ) {
        let fields = ["authors", "collection_date", "organism"];
        let ids: Vec<String> = (0..rows.len()).map(|idx| format!("S{idx}")).collect();
        let mut columns: Vec<Column> = vec![Series::new(ID.into(), ids).into()];
        for (col, name) in fields.iter().enumerate() {
            let values: Vec<Option<String>> = rows.iter().map(|row| row[col].clone()).collect();
            columns.push(Series::new((*name).into(), values).into());
        }
        let df = DataFrame::new(columns).unwrap();
        let requirements = FieldRequirements::new([ID, "authors", "collection_date"], ["organism"]);

        let check = validate_required(&df, &requirements, ID, Destination::Shared).unwrap();

        let is_blank = |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());
        let expected: BTreeSet<&str> = fields[..2]
            .iter()
            .enumerate()
            .filter(|(col, _)| rows.iter().any(|row| is_blank(&row[*col])))
            .map(|(_, name)| *name)
            .collect();
        prop_assert_eq!(check.report.excluded_fields(), expected);

        let blank_rows = rows
            .iter()
            .filter(|row| is_blank(&row[0]) || is_blank(&row[1]))
            .count();
        prop_assert_eq!(check.report.excluded_count(), blank_rows);
        prop_assert_eq!(check.kept_rows() + blank_rows, rows.len());
    }
}
