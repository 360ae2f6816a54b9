//! End-to-end pipeline runs over CSV files.

use std::fs;
use std::path::{Path, PathBuf};

use roster_cli::pipeline::{commit, map, prepare};
use roster_commit::{JsonDirStore, MemoryStore};
use roster_map::MatchTier;
use roster_model::{CellValue, ErrorKind, Field, ImportOptions, ImportOverrides, ImportTable};
use tempfile::TempDir;

const ROSTER: &str = "\
Roll No,Student Name,Gender,Phone,DOB,Email
102,Ravi Kumar,Male,+91-98765-432109,14/03/2005,ravi@example.com
101,Asha Rao,Female,9876543210,2005-01-02,
103,Meena S,gender,,,
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn cse_options() -> ImportOptions {
    ImportOptions::default().with_overrides(ImportOverrides {
        department: Some("Computer Science and Engineering".into()),
        ..ImportOverrides::default()
    })
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn csv_file_name_supplies_the_cohort() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "II-B.csv", ROSTER);

    let prepared = prepare(&path, &cse_options(), &[]).unwrap();

    assert_eq!(prepared.file_name, "II-B.csv");
    assert_eq!(prepared.sheets.len(), 1);
    assert_eq!(prepared.sheets[0].year, "II");
    assert_eq!(prepared.sheets[0].section, "B");
    assert!(!prepared.is_blocked(), "{:?}", prepared.report.errors);
    assert_eq!(prepared.groups.len(), 1);
    assert_eq!(prepared.groups[0].label, "II - Section B");
    // Numeric-aware admission order.
    assert_eq!(prepared.order, vec![1, 0, 2]);
}

#[test]
fn cleaning_runs_before_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "students.csv", ROSTER);

    let prepared = prepare(&path, &cse_options(), &[]).unwrap();
    let phone = prepared.mapping.mapping.get(Field::Phone).unwrap();
    let gender = prepared.mapping.mapping.get(Field::Gender).unwrap();
    let dob = prepared.mapping.mapping.get(Field::DateOfBirth).unwrap();

    assert_eq!(prepared.table.rows[0][phone], CellValue::from("91987654321"));
    assert_eq!(prepared.table.rows[0][dob], CellValue::from("2005-03-14"));
    assert!(prepared.table.rows[2][gender].is_empty());
    assert_eq!(prepared.clean_stats.genders_cleared, 1);
}

#[test]
fn import_to_json_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "II-B.csv", ROSTER);
    let store_dir = dir.path().join("store");
    fs::create_dir(&store_dir).unwrap();
    let options = cse_options();

    let prepared = prepare(&path, &options, &[]).unwrap();
    let mut last_percent = 0.0;
    let (outcome, _) = commit(&prepared, JsonDirStore::new(&store_dir), &options, |p| {
        last_percent = p.percent;
    });

    assert_eq!(outcome.success_count, 3);
    assert_eq!(last_percent, 100.0);
    let doc = read_json(&store_dir.join("students/ComputerScienceEngineering/II/B/CSE_II_B_101.json"));
    assert_eq!(doc["name"], "Asha Rao");
    assert_eq!(doc["year"], "II");
    assert_eq!(doc["section"], "B");
    assert_eq!(doc["status"], "Active");
    let lookup = read_json(&store_dir.join("studentLookup/CSE_II_B_102.json"));
    assert_eq!(lookup["path"], "students/ComputerScienceEngineering/II/B/CSE_II_B_102");
}

#[test]
fn missing_required_column_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "students.csv", "Student Name,Phone\nAsha,9876543210\n");

    let prepared = prepare(&path, &ImportOptions::default(), &[]).unwrap();

    assert!(prepared.is_blocked());
    assert_eq!(prepared.report.count(ErrorKind::Mapping), 1);
    assert_eq!(prepared.report.errors[0].field, Field::AdmissionNumber);
}

#[test]
fn mapping_edit_fixes_unrecognised_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "students.csv", "Ref,Student Name\nX1,Asha\n");

    let edits = vec!["admissionNumber=Ref".to_string()];
    let prepared = prepare(&path, &ImportOptions::default(), &edits).unwrap();

    assert!(!prepared.is_blocked());
    assert_eq!(prepared.mapping.mapping.get(Field::AdmissionNumber), Some(0));
    assert_eq!(
        prepared.mapping.tier_for(Field::AdmissionNumber),
        Some(MatchTier::Manual)
    );
}

#[test]
fn bad_mapping_edit_is_an_error() {
    let table = ImportTable::new(vec!["Name".into()], vec![]);
    let err = map(&table, &["shoeSize=Name".to_string()]).unwrap_err();
    assert!(err.to_string().contains("shoeSize"));
}

#[test]
fn duplicates_are_reported_and_suffixed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "I-A.csv",
        "Admission Number,Student Name\nA1,Asha\nA1,Ravi\n",
    );
    let options = ImportOptions::default();

    let prepared = prepare(&path, &options, &[]).unwrap();
    assert_eq!(prepared.duplicates.len(), 1);
    assert_eq!(prepared.duplicates[0].row, 1);

    let (outcome, store) = commit(&prepared, MemoryStore::new(), &options, |_| {});
    assert_eq!(outcome.student_ids, vec!["UNKNOWN_I_A_A1", "UNKNOWN_I_A_A1_1"]);
    assert!(store.get("studentLookup/UNKNOWN_I_A_A1_1").is_some());
}

#[test]
fn too_many_rows_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut content = String::from("Admission Number,Student Name\n");
    for n in 0..5 {
        content.push_str(&format!("{n},Student {n}\n"));
    }
    let path = write_file(&dir, "big.csv", &content);
    let options = ImportOptions {
        max_rows: 4,
        ..ImportOptions::default()
    };

    let err = prepare(&path, &options, &[]).unwrap_err();
    assert!(format!("{err:#}").contains('4'));
}

#[test]
fn first_year_sheet_keeps_its_year() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "I-A.csv", "Roll No,Student Name\n1,Asha\n");
    let options = ImportOptions::default();

    let prepared = prepare(&path, &options, &[]).unwrap();
    let year = prepared.mapping.mapping.get(Field::Year).unwrap();

    assert_eq!(prepared.sheets[0].year, "I");
    assert_eq!(prepared.table.rows[0][year], CellValue::from("I"));
    assert_eq!(prepared.clean_stats.years_cleared, 0);
    assert!(!prepared.is_blocked(), "{:?}", prepared.report.errors);
    assert_eq!(prepared.groups[0].label, "I - Section A");

    let (outcome, store) = commit(&prepared, MemoryStore::new(), &options, |_| {});
    assert_eq!(outcome.student_ids, vec!["UNKNOWN_I_A_1"]);
    assert!(store.get("students/Unknown/I/A/UNKNOWN_I_A_1").is_some());
}

#[test]
fn candidate_name_column_is_not_date_coerced() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "students.csv", "Roll No,Candidate Name\n1,Asha\n2,Ravi\n");

    let prepared = prepare(&path, &ImportOptions::default(), &[]).unwrap();

    assert_eq!(prepared.mapping.mapping.get(Field::Name), Some(1));
    assert_eq!(prepared.table.rows[0][1], CellValue::from("Asha"));
    assert_eq!(prepared.table.rows[1][1], CellValue::from("Ravi"));
    assert_eq!(prepared.clean_stats.dates_cleared, 0);
    assert!(!prepared.is_blocked(), "{:?}", prepared.report.errors);
}
