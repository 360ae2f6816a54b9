//! Synonym table for header matching.

use std::collections::HashMap;
use std::sync::LazyLock;

use roster_model::Field;

/// Header variations per canonical field.
///
/// Keys are lowercase. Most are alphanumeric; keys with punctuation (`d.o.b`)
/// only match the space-stripped form. Order matters for substring matching:
/// the last matching key wins, so more specific fields come later.
pub const SYNONYMS: &[(&str, Field)] = &[
    // Admission number
    ("admissionnumber", Field::AdmissionNumber),
    ("admissionno", Field::AdmissionNumber),
    ("admission", Field::AdmissionNumber),
    ("admno", Field::AdmissionNumber),
    ("admnno", Field::AdmissionNumber),
    ("rollno", Field::AdmissionNumber),
    ("rollnumber", Field::AdmissionNumber),
    ("roll", Field::AdmissionNumber),
    ("regno", Field::AdmissionNumber),
    ("reg.no", Field::AdmissionNumber),
    ("registerno", Field::AdmissionNumber),
    ("registernumber", Field::AdmissionNumber),
    ("registrationno", Field::AdmissionNumber),
    ("registrationnumber", Field::AdmissionNumber),
    ("enrollmentno", Field::AdmissionNumber),
    ("enrollmentnumber", Field::AdmissionNumber),
    ("studentid", Field::AdmissionNumber),
    ("usn", Field::AdmissionNumber),
    // Name
    ("name", Field::Name),
    ("studentname", Field::Name),
    ("student", Field::Name),
    ("fullname", Field::Name),
    ("candidatename", Field::Name),
    ("nameofthestudent", Field::Name),
    // Cohort
    ("department", Field::Department),
    ("dept", Field::Department),
    ("branch", Field::Department),
    ("course", Field::Department),
    ("programme", Field::Department),
    ("year", Field::Year),
    ("yr", Field::Year),
    ("yearofstudy", Field::Year),
    ("currentyear", Field::Year),
    ("section", Field::Section),
    ("sec", Field::Section),
    ("division", Field::Section),
    ("div", Field::Section),
    // Personal details
    ("gender", Field::Gender),
    ("sex", Field::Gender),
    ("email", Field::Email),
    ("e-mail", Field::Email),
    ("emailid", Field::Email),
    ("emailaddress", Field::Email),
    ("mailid", Field::Email),
    ("phone", Field::Phone),
    ("phonenumber", Field::Phone),
    ("phoneno", Field::Phone),
    ("ph.no", Field::Phone),
    ("mobile", Field::Phone),
    ("mobileno", Field::Phone),
    ("mobilenumber", Field::Phone),
    ("contact", Field::Phone),
    ("contactno", Field::Phone),
    ("contactnumber", Field::Phone),
    ("studentmobile", Field::Phone),
    ("studentphone", Field::Phone),
    ("dateofbirth", Field::DateOfBirth),
    ("dob", Field::DateOfBirth),
    ("d.o.b", Field::DateOfBirth),
    ("birthdate", Field::DateOfBirth),
    ("bloodgroup", Field::BloodGroup),
    ("blood", Field::BloodGroup),
    ("b.g", Field::BloodGroup),
    ("address", Field::Address),
    ("addr", Field::Address),
    ("permanentaddress", Field::Address),
    ("residentialaddress", Field::Address),
    ("quota", Field::Quota),
    ("admissionquota", Field::Quota),
    ("admissiontype", Field::Quota),
    ("category", Field::Quota),
    ("totalfees", Field::TotalFees),
    ("totalfee", Field::TotalFees),
    ("fees", Field::TotalFees),
    ("fee", Field::TotalFees),
    ("feeamount", Field::TotalFees),
    // Family
    ("fathername", Field::FatherName),
    ("father", Field::FatherName),
    ("fathersname", Field::FatherName),
    ("guardian", Field::FatherName),
    ("guardianname", Field::FatherName),
    ("mothername", Field::MotherName),
    ("mother", Field::MotherName),
    ("mothersname", Field::MotherName),
    ("parentphone", Field::ParentPhone),
    ("parentsphone", Field::ParentPhone),
    ("parentmobile", Field::ParentPhone),
    ("parentcontact", Field::ParentPhone),
    ("parentno", Field::ParentPhone),
    ("fathermobile", Field::ParentPhone),
    ("fatherphone", Field::ParentPhone),
    ("mothermobile", Field::ParentPhone),
    ("motherphone", Field::ParentPhone),
    ("guardianphone", Field::ParentPhone),
    ("guardianmobile", Field::ParentPhone),
    // Dates
    ("admissiondate", Field::AdmissionDate),
    ("dateofadmission", Field::AdmissionDate),
    ("doa", Field::AdmissionDate),
    ("joiningdate", Field::AdmissionDate),
    ("dateofjoining", Field::AdmissionDate),
];

static EXACT: LazyLock<HashMap<&'static str, Field>> =
    LazyLock::new(|| SYNONYMS.iter().copied().collect());

/// Exact synonym lookup.
pub fn lookup(key: &str) -> Option<Field> {
    EXACT.get(key).copied()
}

/// Synonym keys for one field, in table order.
pub fn synonyms_for(field: Field) -> impl Iterator<Item = &'static str> {
    SYNONYMS
        .iter()
        .filter(move |(_, f)| *f == field)
        .map(|(key, _)| *key)
}
