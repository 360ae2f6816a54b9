//! Canonical field catalog.
//!
//! Every source column is ultimately mapped to one of these fields. Each
//! field carries its storage key, its label (also used as the template
//! header), whether it is required, its value type and, for select fields,
//! the accepted option set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cohort::{SECTION_OPTIONS, YEAR_OPTIONS};
use crate::department::DEPARTMENT_NAMES;
use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    AdmissionNumber,
    Name,
    Department,
    Year,
    Section,
    Gender,
    DateOfBirth,
    Email,
    Phone,
    ParentPhone,
    FatherName,
    MotherName,
    BloodGroup,
    Address,
    AdmissionDate,
    Quota,
    TotalFees,
}

/// Value type of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Select,
    Email,
    Tel,
    Number,
    Date,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Select => "select",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Number => "number",
            Self::Date => "date",
        }
    }
}

/// Static definition of a canonical field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub field: Field,
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldType,
    pub options: &'static [&'static str],
}

const GENDER_OPTIONS: [&str; 3] = ["Male", "Female", "Other"];
const BLOOD_GROUP_OPTIONS: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
const QUOTA_OPTIONS: [&str; 3] = ["Government", "Management", "NRI"];

const fn def(
    field: Field,
    key: &'static str,
    label: &'static str,
    required: bool,
    kind: FieldType,
) -> FieldDef {
    FieldDef {
        field,
        key,
        label,
        required,
        kind,
        options: &[],
    }
}

const fn select(
    field: Field,
    key: &'static str,
    label: &'static str,
    options: &'static [&'static str],
) -> FieldDef {
    FieldDef {
        field,
        key,
        label,
        required: false,
        kind: FieldType::Select,
        options,
    }
}

/// The canonical field catalog, in template column order.
pub const CATALOG: [FieldDef; 17] = [
    def(
        Field::AdmissionNumber,
        "admissionNumber",
        "Admission Number",
        true,
        FieldType::Text,
    ),
    def(Field::Name, "name", "Student Name", true, FieldType::Text),
    select(
        Field::Department,
        "department",
        "Department",
        &DEPARTMENT_NAMES,
    ),
    select(Field::Year, "year", "Year", &YEAR_OPTIONS),
    select(Field::Section, "section", "Section", &SECTION_OPTIONS),
    select(Field::Gender, "gender", "Gender", &GENDER_OPTIONS),
    def(
        Field::DateOfBirth,
        "dateOfBirth",
        "Date of Birth",
        false,
        FieldType::Date,
    ),
    def(Field::Email, "email", "Email", false, FieldType::Email),
    def(Field::Phone, "phone", "Phone Number", false, FieldType::Tel),
    def(
        Field::ParentPhone,
        "parentPhone",
        "Parent Phone",
        false,
        FieldType::Tel,
    ),
    def(
        Field::FatherName,
        "fatherName",
        "Father Name",
        false,
        FieldType::Text,
    ),
    def(
        Field::MotherName,
        "motherName",
        "Mother Name",
        false,
        FieldType::Text,
    ),
    select(
        Field::BloodGroup,
        "bloodGroup",
        "Blood Group",
        &BLOOD_GROUP_OPTIONS,
    ),
    def(Field::Address, "address", "Address", false, FieldType::Text),
    def(
        Field::AdmissionDate,
        "admissionDate",
        "Admission Date",
        false,
        FieldType::Date,
    ),
    select(Field::Quota, "quota", "Admission Quota", &QUOTA_OPTIONS),
    def(
        Field::TotalFees,
        "totalFees",
        "Total Fees",
        false,
        FieldType::Number,
    ),
];

impl Field {
    /// All fields in catalog order.
    pub fn all() -> impl Iterator<Item = Field> {
        CATALOG.iter().map(|def| def.field)
    }

    pub fn def(&self) -> &'static FieldDef {
        // CATALOG is declared in enum order.
        &CATALOG[*self as usize]
    }

    pub fn key(&self) -> &'static str {
        self.def().key
    }

    pub fn label(&self) -> &'static str {
        self.def().label
    }

    pub fn kind(&self) -> FieldType {
        self.def().kind
    }

    pub fn is_required(&self) -> bool {
        self.def().required
    }

    /// Looks a field up by storage key (`admissionNumber`) or label
    /// (`Admission Number`), ignoring case.
    pub fn from_key(value: &str) -> Option<Field> {
        let needle = value.trim();
        CATALOG
            .iter()
            .find(|def| def.key.eq_ignore_ascii_case(needle) || def.label.eq_ignore_ascii_case(needle))
            .map(|def| def.field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_key(s).ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}
