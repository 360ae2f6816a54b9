//! Commit loop scenarios against the in-memory and JSON directory stores.

use proptest::prelude::*;
use roster_commit::{
    BatchCommitter, CommitError, CommitProgress, FailureKind, JsonDirStore, MemoryStore,
};
use roster_model::{CellValue, Field, FieldMapping, ImportOptions, ImportOverrides, ImportTable};

fn table(rows: &[(&str, &str)]) -> ImportTable {
    ImportTable::new(
        vec![
            "Admission Number".into(),
            "Student Name".into(),
            "Year".into(),
            "Section".into(),
        ],
        rows.iter()
            .map(|(adm, name)| {
                vec![
                    CellValue::from(*adm),
                    CellValue::from(*name),
                    CellValue::from("II"),
                    CellValue::from("A"),
                ]
            })
            .collect(),
    )
}

fn numbered_table(count: usize) -> ImportTable {
    let admissions: Vec<String> = (1..=count).map(|n| (1000 + n).to_string()).collect();
    let rows: Vec<(&str, &str)> = admissions.iter().map(|adm| (adm.as_str(), "Student")).collect();
    table(&rows)
}

fn mapping() -> FieldMapping {
    let mut mapping = FieldMapping::new();
    mapping.set(Field::AdmissionNumber, Some(0));
    mapping.set(Field::Name, Some(1));
    mapping.set(Field::Year, Some(2));
    mapping.set(Field::Section, Some(3));
    mapping
}

fn options() -> ImportOptions {
    ImportOptions::default().with_overrides(ImportOverrides {
        department: Some("CSE".into()),
        ..ImportOverrides::default()
    })
}

fn in_order(table: &ImportTable) -> Vec<usize> {
    (0..table.len()).collect()
}

#[test]
fn batch_boundary_for_101_rows() {
    let table = numbered_table(101);
    let mut committer = BatchCommitter::new(MemoryStore::new(), options());
    let mut progress: Vec<CommitProgress> = Vec::new();

    let outcome = committer.commit(&table, &mapping(), &in_order(&table), |p| progress.push(p));

    assert_eq!(outcome.success_count, 101);
    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.batches, vec![50, 50, 1]);
    assert_eq!(committer.store().committed_batches(), &[100, 100, 2]);
    assert_eq!(progress.len(), 101);
    assert_eq!(progress.last().map(|p| p.percent), Some(100.0));
    assert!(outcome.is_success());

    let store = committer.into_store();
    assert_eq!(store.documents().len(), 202);
    let student = store
        .get("students/ComputerScienceEngineering/II/A/CSE_II_A_1001")
        .unwrap();
    assert_eq!(student["name"], "Student");
    assert_eq!(student["department"], "CSE");
    assert!(student["createdAt"].is_string());
    assert!(store.get("studentLookup/CSE_II_A_1101").is_some());
}

#[test]
fn connectivity_failure_stops_the_run() {
    let table = numbered_table(101);
    let store = MemoryStore::new().fail_commit(2, FailureKind::Connectivity);
    let mut committer = BatchCommitter::new(store, options());

    let outcome = committer.commit(&table, &mapping(), &in_order(&table), |_| {});

    assert_eq!(outcome.success_count, 50);
    assert_eq!(outcome.error_count, 50);
    assert_eq!(outcome.skipped_count, 1);
    assert!(outcome.aborted.as_ref().is_some_and(|e| e.is_connectivity()));
    assert!(matches!(
        outcome.errors.last().map(|e| &e.error),
        Some(CommitError::Aborted)
    ));
    assert_eq!(committer.store().attempts(), 2);
    assert_eq!(committer.store().documents().len(), 100);
}

#[test]
fn rejected_batch_does_not_stop_the_run() {
    let table = numbered_table(101);
    let store = MemoryStore::new().fail_commit(1, FailureKind::Rejected);
    let mut committer = BatchCommitter::new(store, options());

    let outcome = committer.commit(&table, &mapping(), &in_order(&table), |_| {});

    assert_eq!(outcome.success_count, 51);
    assert_eq!(outcome.error_count, 50);
    assert!(outcome.aborted.is_none());
    assert!(
        outcome
            .errors
            .iter()
            .all(|e| matches!(e.error, CommitError::BatchFailed { batch: 1, .. }))
    );
    assert_eq!(committer.store().attempts(), 3);
}

#[test]
fn row_without_name_is_skipped() {
    let table = table(&[("1", "Asha"), ("2", ""), ("3", "Ravi")]);
    let mut committer = BatchCommitter::new(MemoryStore::new(), options());

    let outcome = committer.commit(&table, &mapping(), &in_order(&table), |_| {});

    assert_eq!(outcome.success_count, 2);
    assert_eq!(outcome.error_count, 1);
    assert_eq!(outcome.errors[0].row, 1);
    assert_eq!(outcome.errors[0].to_string(), "row 2: Student Name is missing");
    assert_eq!(outcome.student_ids, vec!["CSE_II_A_1", "CSE_II_A_3"]);
}

#[test]
fn commit_follows_the_given_order() {
    let table = table(&[("1", "Asha"), ("2", "Ravi"), ("3", "Meena")]);
    let mut committer = BatchCommitter::new(MemoryStore::new(), options());

    let outcome = committer.commit(&table, &mapping(), &[2, 0, 1], |_| {});

    assert_eq!(outcome.student_ids, vec!["CSE_II_A_3", "CSE_II_A_1", "CSE_II_A_2"]);
}

#[test]
fn duplicates_get_suffixed_ids() {
    let table = table(&[("A1", "Asha"), ("A1", "Ravi"), ("A1", "Meena")]);
    let mut committer = BatchCommitter::new(MemoryStore::new(), options());

    let outcome = committer.commit(&table, &mapping(), &in_order(&table), |_| {});

    assert_eq!(
        outcome.student_ids,
        vec!["CSE_II_A_A1", "CSE_II_A_A1_1", "CSE_II_A_A1_2"]
    );
    let stored = committer.store().get("studentLookup/CSE_II_A_A1_2").unwrap();
    assert_eq!(stored["admissionNumber"], "A1_2");
    assert_eq!(stored["name"], "Meena");
}

#[test]
fn json_dir_store_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let table = table(&[("1001", "Asha")]);
    let mut committer = BatchCommitter::new(JsonDirStore::new(dir.path()), options());

    let outcome = committer.commit(&table, &mapping(), &in_order(&table), |_| {});

    assert_eq!(outcome.success_count, 1);
    assert!(
        dir.path()
            .join("students/ComputerScienceEngineering/II/A/CSE_II_A_1001.json")
            .exists()
    );
    assert!(dir.path().join("studentLookup/CSE_II_A_1001.json").exists());
}

#[test]
fn missing_storage_directory_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let table = numbered_table(3);
    let store = JsonDirStore::new(dir.path().join("offline"));
    let mut committer = BatchCommitter::new(store, options());

    let outcome = committer.commit(&table, &mapping(), &in_order(&table), |_| {});

    assert_eq!(outcome.success_count, 0);
    assert_eq!(outcome.error_count, 3);
    assert!(outcome.aborted.is_some());
}

proptest! {
    #[test]
    fn student_ids_never_collide(admissions in prop::collection::vec("[A1_-]{1,3}", 1..40)) {
        let rows: Vec<(&str, &str)> = admissions.iter().map(|adm| (adm.as_str(), "Student")).collect();
        let table = table(&rows);
        let mut committer = BatchCommitter::new(MemoryStore::new(), options());

        let outcome = committer.commit(&table, &mapping(), &in_order(&table), |_| {});

        let mut ids = outcome.student_ids.clone();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), outcome.student_ids.len());
        prop_assert_eq!(outcome.success_count + outcome.error_count, admissions.len());
    }
}
