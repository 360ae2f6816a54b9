//! Projection of a cleaned row into the student and lookup documents.

use chrono::Utc;
use roster_model::department::{path_name, short_code};
use roster_model::{CellValue, Field, FieldMapping, FieldType, FieldValue, ImportOptions, Record};
use roster_transform::{DuplicateResolver, normalize_date_text, row_cohort};

use crate::error::CommitError;
use crate::path::{
    DocumentPath, LOOKUP_COLLECTION, STUDENTS_COLLECTION, sanitize_id_segment, sanitize_segment,
};

const UNKNOWN: &str = "Unknown";
const DEFAULT_STATUS: &str = "Active";
const DEFAULT_PAYMENT_STATUS: &str = "Pending";

/// The two writes produced for one row.
#[derive(Debug, Clone)]
pub struct StudentWrite {
    /// Zero-based row index in the import table.
    pub row: usize,
    pub student_id: String,
    pub student_path: DocumentPath,
    pub lookup_path: DocumentPath,
    pub record: Record,
    pub lookup: Record,
}

/// Builds [`StudentWrite`]s for one commit run.
///
/// Owns the run's [`DuplicateResolver`], so rows must be built in commit
/// order and a builder must not be reused across imports.
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    mapping: &'a FieldMapping,
    options: &'a ImportOptions,
    resolver: DuplicateResolver,
    run_millis: i64,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(mapping: &'a FieldMapping, options: &'a ImportOptions) -> Self {
        Self {
            mapping,
            options,
            resolver: DuplicateResolver::new(),
            run_millis: Utc::now().timestamp_millis(),
        }
    }

    /// Projects `cells` into a record and derives its id and paths.
    pub fn build(&mut self, row: usize, cells: &[CellValue]) -> Result<StudentWrite, CommitError> {
        let mut record = Record::new();
        for (field, column) in self.mapping.iter() {
            let cell = cells.get(column).unwrap_or(&CellValue::Empty);
            record.insert(field.key(), project(field, cell));
        }

        let name = record.text(Field::Name.key()).to_string();
        if name.is_empty() {
            return Err(CommitError::MissingRequired { field: Field::Name });
        }

        let mut admission = record.text(Field::AdmissionNumber.key()).to_string();
        if admission.is_empty() {
            if !self.options.synthesize_missing_admission {
                return Err(CommitError::MissingRequired {
                    field: Field::AdmissionNumber,
                });
            }
            admission = format!("{}{row:04}", self.run_millis);
        }
        let key = sanitize_id_segment(&admission);
        if key.is_empty() {
            return Err(CommitError::UnusableAdmissionNumber { value: admission });
        }
        let resolved = self.resolver.resolve(&key);
        let suffix = &resolved[key.len()..];
        let admission = format!("{admission}{suffix}");

        let department = self
            .options
            .overrides
            .department
            .clone()
            .or_else(|| non_empty(record.text(Field::Department.key())))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let cohort = row_cohort(cells, self.mapping, &self.options.overrides);
        let year = non_empty(&cohort.year).unwrap_or_else(|| UNKNOWN.to_string());
        let section = non_empty(&cohort.section).unwrap_or_else(|| UNKNOWN.to_string());

        let year_segment = sanitize_segment(&year);
        let section_segment = sanitize_segment(&section);
        let student_id = format!(
            "{}_{year_segment}_{section_segment}_{resolved}",
            short_code(&department)
        );
        let student_path = DocumentPath::from_segments(&[
            STUDENTS_COLLECTION,
            path_name(&department),
            year_segment.as_str(),
            section_segment.as_str(),
            student_id.as_str(),
        ])?;
        let lookup_path = DocumentPath::from_segments(&[LOOKUP_COLLECTION, student_id.as_str()])?;

        record.insert_text(Field::AdmissionNumber.key(), admission.clone());
        record.insert_text(Field::Department.key(), department.clone());
        record.insert_text(Field::Year.key(), year.clone());
        record.insert_text(Field::Section.key(), section.clone());
        record.insert_text("studentId", student_id.clone());
        record.insert_text("status", DEFAULT_STATUS);
        record.insert_text("paymentStatus", DEFAULT_PAYMENT_STATUS);
        for key in ["createdAt", "updatedAt", "importDate"] {
            record.insert(key, FieldValue::ServerTimestamp);
        }

        let mut lookup = Record::new();
        lookup.insert_text("studentId", student_id.clone());
        lookup.insert_text("name", name);
        lookup.insert_text("admissionNumber", admission);
        lookup.insert_text("department", department);
        lookup.insert_text("year", year);
        lookup.insert_text("section", section);
        lookup.insert_text("path", student_path.as_str());
        lookup.insert("createdAt", FieldValue::ServerTimestamp);

        Ok(StudentWrite {
            row,
            student_id,
            student_path,
            lookup_path,
            record,
            lookup,
        })
    }
}

/// Type coercion applied to a mapped cell.
fn project(field: Field, cell: &CellValue) -> FieldValue {
    match field.kind() {
        FieldType::Number => FieldValue::Number(match cell {
            CellValue::Number(n) => *n,
            other => other.to_trimmed_string().parse().unwrap_or(0.0),
        }),
        FieldType::Date => FieldValue::Text(normalize_date_text(cell).unwrap_or_default()),
        _ => FieldValue::Text(cell.to_trimmed_string()),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::ImportOverrides;

    fn mapping() -> FieldMapping {
        let mut mapping = FieldMapping::new();
        for (column, field) in [
            Field::AdmissionNumber,
            Field::Name,
            Field::Year,
            Field::Section,
            Field::TotalFees,
            Field::DateOfBirth,
        ]
        .into_iter()
        .enumerate()
        {
            mapping.set(field, Some(column));
        }
        mapping
    }

    fn cells(values: [&str; 6]) -> Vec<CellValue> {
        values.into_iter().map(CellValue::from).collect()
    }

    #[test]
    fn test_paths_and_defaults() {
        let mapping = mapping();
        let options = ImportOptions::default().with_overrides(ImportOverrides {
            department: Some("Computer Science and Engineering".into()),
            ..ImportOverrides::default()
        });
        let mut builder = RecordBuilder::new(&mapping, &options);
        let write = builder
            .build(0, &cells(["1001", "Asha", "II", "A", "1500", "2005-03-14"]))
            .unwrap();

        assert_eq!(write.student_id, "CSE_II_A_1001");
        assert_eq!(
            write.student_path.as_str(),
            "students/ComputerScienceEngineering/II/A/CSE_II_A_1001"
        );
        assert_eq!(write.lookup_path.as_str(), "studentLookup/CSE_II_A_1001");
        assert_eq!(write.record.text("status"), "Active");
        assert_eq!(write.record.text("paymentStatus"), "Pending");
        assert_eq!(write.record.get("totalFees"), Some(&FieldValue::Number(1500.0)));
        assert_eq!(write.record.text("dateOfBirth"), "2005-03-14");
        assert_eq!(write.record.get("importDate"), Some(&FieldValue::ServerTimestamp));
        assert_eq!(write.lookup.text("path"), write.student_path.as_str());
    }

    #[test]
    fn test_unknown_fallbacks() {
        let mapping = mapping();
        let options = ImportOptions::default();
        let mut builder = RecordBuilder::new(&mapping, &options);
        let write = builder
            .build(0, &cells(["1001", "Asha", "", "", "abc", ""]))
            .unwrap();

        assert_eq!(write.student_id, "UNKNOWN_Unknown_Unknown_1001");
        assert_eq!(
            write.student_path.as_str(),
            "students/Unknown/Unknown/Unknown/UNKNOWN_Unknown_Unknown_1001"
        );
        assert_eq!(write.record.text("department"), "Unknown");
        assert_eq!(write.record.get("totalFees"), Some(&FieldValue::Number(0.0)));
    }

    #[test]
    fn test_duplicate_suffixes() {
        let mapping = mapping();
        let options = ImportOptions::default();
        let mut builder = RecordBuilder::new(&mapping, &options);
        let ids: Vec<(String, String)> = ["A1", "A1", "A-1"]
            .into_iter()
            .enumerate()
            .map(|(row, adm)| {
                let write = builder.build(row, &cells([adm, "Asha", "I", "B", "", ""])).unwrap();
                (write.student_id, write.record.text("admissionNumber").to_string())
            })
            .collect();

        assert_eq!(
            ids,
            vec![
                ("UNKNOWN_I_B_A1".to_string(), "A1".to_string()),
                ("UNKNOWN_I_B_A1_1".to_string(), "A1_1".to_string()),
                ("UNKNOWN_I_B_A1_2".to_string(), "A-1_2".to_string()),
            ]
        );
    }

    #[test]
    fn test_required_values() {
        let mapping = mapping();
        let options = ImportOptions {
            synthesize_missing_admission: false,
            ..ImportOptions::default()
        };
        let mut builder = RecordBuilder::new(&mapping, &options);

        let err = builder.build(0, &cells(["1001", " ", "I", "A", "", ""])).unwrap_err();
        assert!(matches!(err, CommitError::MissingRequired { field: Field::Name }));

        let err = builder.build(1, &cells(["", "Asha", "I", "A", "", ""])).unwrap_err();
        assert!(matches!(
            err,
            CommitError::MissingRequired {
                field: Field::AdmissionNumber
            }
        ));

        let err = builder.build(2, &cells(["#/-", "Asha", "I", "A", "", ""])).unwrap_err();
        assert!(matches!(err, CommitError::UnusableAdmissionNumber { .. }));
    }

    #[test]
    fn test_synthesized_admission_numbers_are_unique() {
        let mapping = mapping();
        let options = ImportOptions::default();
        let mut builder = RecordBuilder::new(&mapping, &options);
        let a = builder.build(3, &cells(["", "Asha", "I", "A", "", ""])).unwrap();
        let b = builder.build(4, &cells(["", "Ravi", "I", "A", "", ""])).unwrap();

        assert!(!a.record.text("admissionNumber").is_empty());
        assert_ne!(a.student_id, b.student_id);
    }
}
