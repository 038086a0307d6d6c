//! End-to-end pipeline tests over on-disk TSV fixtures.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tcga_explorer_common::{ExplorerError, ReadErrorKind};
use tcga_explorer_data::derive::with_age_at_diagnosis_year;
use tcga_explorer_data::loader::parse_tsv;
use tcga_explorer_data::pipeline::build_joined_table;
use tcga_explorer_data::schema::{
    AGE_AT_DIAGNOSIS_YEAR, CASE_ID, RELATIVE_WITH_CANCER_HISTORY, STAGE, YEAR_OF_DIAGNOSIS,
};
use tcga_explorer_data::{Dataset, DatasetCache, SourcePaths, Table, Value};
use tcga_explorer_test_utils::{FixtureDir, TsvBuilder, SENTINEL};

const MAX_BYTES: u64 = 1024 * 1024;

fn sample_table() -> Table {
    let fixture = FixtureDir::sample().unwrap();
    let paths = SourcePaths::new(&fixture.clinical, &fixture.family_history);
    Dataset::from_sources(&paths, MAX_BYTES).unwrap().table
}

fn column_strings(table: &Table, column: &str) -> Vec<String> {
    table
        .column_values(column)
        .unwrap()
        .iter()
        .map(|v| v.to_string())
        .collect()
}

#[test]
fn test_single_case_scenario() {
    let clinical = TsvBuilder::clinical()
        .row(&[
            ("case_id", "c1"),
            ("tumor_stage", "Stage I"),
            ("pathologic_stage", "Stage II"),
            ("ajcc_clinical_stage", "Stage IV"),
            ("year_of_diagnosis", "2010"),
            ("age_at_diagnosis", "7300"),
        ])
        .build();
    let family = TsvBuilder::family_history()
        .row(&[("case_id", "c1"), ("relative_with_cancer_history", "yes")])
        .build();

    let fixture = FixtureDir::write(&clinical, &family).unwrap();
    let dataset = Dataset::from_sources(&SourcePaths::new(&fixture.clinical, &fixture.family_history), MAX_BYTES)
        .unwrap();
    let table = with_age_at_diagnosis_year(&dataset.table);

    assert_eq!(table.len(), 1);
    assert_eq!(table.value(0, STAGE), Some(&Value::text("Stage IStage II")));
    assert_eq!(table.value(0, YEAR_OF_DIAGNOSIS), Some(&Value::Number(2010.0)));
    assert_eq!(table.value(0, AGE_AT_DIAGNOSIS_YEAR), Some(&Value::Number(20.0)));
    assert_eq!(table.value(0, RELATIVE_WITH_CANCER_HISTORY), Some(&Value::Number(1.0)));
}

#[test]
fn test_no_sentinel_survives() {
    let table = sample_table();
    for row in table.rows() {
        for cell in row {
            assert_ne!(cell, &Value::text(SENTINEL));
        }
    }
}

#[test]
fn test_join_cardinality() {
    let table = sample_table();
    // c3 has two relatives, everyone else at most one.
    assert_eq!(table.len(), 7);
    assert_eq!(
        column_strings(&table, CASE_ID),
        vec!["c1", "c2", "c3", "c3", "c4", "c5", "c6"]
    );
}

#[test]
fn test_join_equals_clinical_when_cases_are_unique() {
    let clinical = tcga_explorer_test_utils::sample_clinical();
    let family = TsvBuilder::family_history()
        .row(&[("case_id", "c2"), ("relative_with_cancer_history", "no")])
        .build();
    let table = build_joined_table(
        &parse_tsv("clinical.tsv".as_ref(), clinical.as_bytes()).unwrap(),
        &parse_tsv("family_history.tsv".as_ref(), family.as_bytes()).unwrap(),
    )
    .unwrap();
    assert_eq!(table.len(), 6);
    assert_eq!(table.value(1, RELATIVE_WITH_CANCER_HISTORY), Some(&Value::Number(0.0)));
    assert_eq!(table.value(0, RELATIVE_WITH_CANCER_HISTORY), Some(&Value::Absent));
}

#[test]
fn test_stage_labels_are_canonical() {
    let table = sample_table();
    assert_eq!(
        column_strings(&table, STAGE),
        vec!["Stage IIA", "Stage I", "Stage IIA", "Stage IIA", "Not Reported", "", "Stage III"]
    );
    assert_eq!(table.value(5, STAGE), Some(&Value::Absent));
}

#[test]
fn test_family_project_id_is_prefixed() {
    let table = sample_table();
    assert!(table.column_index("family_project_id").is_some());
    assert_eq!(table.value(0, "family_project_id"), Some(&Value::text("TCGA-LUAD")));
    assert_eq!(table.value(1, "family_project_id"), Some(&Value::Absent));
}

#[test]
fn test_missing_clinical_column_is_schema_error() {
    let clinical = TsvBuilder::new(&["case_id", "tumor_stage"]).row(&[("case_id", "c1")]).build();
    let fixture = FixtureDir::write(&clinical, &tcga_explorer_test_utils::sample_family_history()).unwrap();
    let err = Dataset::from_sources(&SourcePaths::new(&fixture.clinical, &fixture.family_history), MAX_BYTES)
        .unwrap_err();
    assert!(matches!(err, ExplorerError::Schema { ref table, .. } if table == "clinical"));
}

#[test]
fn test_header_only_file_is_empty_read_error() {
    let fixture = FixtureDir::write(&TsvBuilder::clinical().build(), &tcga_explorer_test_utils::sample_family_history())
        .unwrap();
    let err = Dataset::from_sources(&SourcePaths::new(&fixture.clinical, &fixture.family_history), MAX_BYTES)
        .unwrap_err();
    assert_eq!(err.read_kind(), Some(ReadErrorKind::Empty));
}

#[test]
fn test_cache_memoizes_by_content() {
    let fixture = FixtureDir::sample().unwrap();
    let paths = SourcePaths::new(&fixture.clinical, &fixture.family_history);
    let cache = DatasetCache::new(MAX_BYTES);

    let first = cache.get_or_load(&paths).unwrap();
    let second = cache.get_or_load(&paths).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    let edited = TsvBuilder::clinical()
        .row(&[("case_id", "c9"), ("tissue_or_organ_of_origin", "Lung, NOS")])
        .build();
    fixture.rewrite_clinical(&edited).unwrap();
    let third = cache.get_or_load(&paths).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_ne!(first.fingerprint, third.fingerprint);
    assert_eq!(third.table.len(), 1);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_cache_rejects_oversize_source() {
    let fixture = FixtureDir::sample().unwrap();
    let cache = DatasetCache::new(16);
    let err = cache
        .get_or_load(&SourcePaths::new(&fixture.clinical, &fixture.family_history))
        .unwrap_err();
    assert_eq!(err.read_kind(), Some(ReadErrorKind::TooLarge));
    assert!(cache.is_empty());
}
