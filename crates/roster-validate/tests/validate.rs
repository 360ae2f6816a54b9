use roster_model::{CellValue, ErrorKind, Field, FieldMapping, ImportTable};
use roster_validate::validate;

fn table(headers: &[&str], rows: Vec<Vec<&str>>) -> ImportTable {
    ImportTable::new(
        headers.iter().map(|h| (*h).to_string()).collect(),
        rows.into_iter()
            .map(|r| r.into_iter().map(CellValue::from).collect())
            .collect(),
    )
}

fn mapping(fields: &[Field]) -> FieldMapping {
    let mut mapping = FieldMapping::new();
    for (col, field) in fields.iter().enumerate() {
        mapping.set(*field, Some(col));
    }
    mapping
}

#[test]
fn unmapped_required_field_is_reported_once() {
    let t = table(&["Name"], vec![vec!["Asha"]; 25]);
    let report = validate(&t, &mapping(&[Field::Name]));
    assert_eq!(report.count(ErrorKind::Mapping), 1);
    assert_eq!(report.count(ErrorKind::Validation), 0);
    assert!(report.has_errors());
}

#[test]
fn every_violation_is_collected() {
    let fields = [
        Field::AdmissionNumber,
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Gender,
        Field::TotalFees,
        Field::DateOfBirth,
    ];
    let t = table(
        &["Roll", "Name", "Email", "Phone", "Gender", "Fees", "DOB"],
        vec![
            vec!["1", "Asha", "asha@college.edu", "9876543210", "Female", "1000", "2005-04-01"],
            vec!["", "Ravi", "ravi@", "12345", "M", "-5", "whenever"],
            vec!["3", "", "no email", "", "", "", ""],
        ],
    );
    let report = validate(&t, &mapping(&fields));
    assert_eq!(report.count(ErrorKind::Mapping), 0);

    // Fields are checked in catalog order within a row.
    let found: Vec<(Option<usize>, Field)> = report.errors.iter().map(|e| (e.row, e.field)).collect();
    assert_eq!(
        found,
        vec![
            (Some(1), Field::AdmissionNumber),
            (Some(1), Field::Gender),
            (Some(1), Field::DateOfBirth),
            (Some(1), Field::Email),
            (Some(1), Field::Phone),
            (Some(1), Field::TotalFees),
            (Some(2), Field::Name),
        ]
    );
}

#[test]
fn header_echo_rows_are_not_errors() {
    let t = table(
        &["Roll", "Name", "Gender", "Year", "Section"],
        vec![vec!["Roll", "Name", "GENDER", "year", "Section"]],
    );
    let report = validate(
        &t,
        &mapping(&[
            Field::AdmissionNumber,
            Field::Name,
            Field::Gender,
            Field::Year,
            Field::Section,
        ]),
    );
    assert!(!report.has_errors(), "{:?}", report.errors);
}

#[test]
fn cohort_values_accept_every_catalog_form() {
    let t = table(
        &["Roll", "Name", "Year", "Section"],
        vec![
            vec!["1", "A", "III", "B"],
            vec!["2", "B", "2nd Year", "gamma"],
            vec!["3", "C", "Fourth Year", "z"],
            vec!["4", "D", "13th Year", "AA"],
        ],
    );
    let report = validate(
        &t,
        &mapping(&[Field::AdmissionNumber, Field::Name, Field::Year, Field::Section]),
    );
    let rows: Vec<Option<usize>> = report.errors.iter().map(|e| e.row).collect();
    assert_eq!(rows, vec![Some(3), Some(3)]);
}

#[test]
fn cohort_values_the_pipeline_files_are_accepted() {
    let t = table(
        &["Roll", "Name", "Year", "Section"],
        vec![
            // Synthetic columns from sheets named `5th Year A` and `VI-B`.
            vec!["1", "A", "5th Year", "A"],
            vec!["2", "B", "VI", "B"],
            // Combined cohort cell in the Year column.
            vec!["3", "C", "IIIA", ""],
            vec!["4", "D", "II", "sec b"],
        ],
    );
    let report = validate(
        &t,
        &mapping(&[Field::AdmissionNumber, Field::Name, Field::Year, Field::Section]),
    );
    assert!(!report.has_errors(), "{:?}", report.errors);
}
