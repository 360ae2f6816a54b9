//! Department catalog: display names, short codes and path-safe names.

/// A department an operator can select and records are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Department {
    pub name: &'static str,
    /// Short code used as the first segment of a student id.
    pub short_code: &'static str,
    /// Alphanumeric name used as the department segment of storage paths.
    pub path_name: &'static str,
}

pub const DEPARTMENTS: [Department; 14] = [
    Department {
        name: "Computer Science and Engineering",
        short_code: "CSE",
        path_name: "ComputerScienceEngineering",
    },
    Department {
        name: "Information Technology",
        short_code: "IT",
        path_name: "InformationTechnology",
    },
    Department {
        name: "Electronics and Communication Engineering",
        short_code: "ECE",
        path_name: "ElectronicsCommunicationEngineering",
    },
    Department {
        name: "Electrical and Electronics Engineering",
        short_code: "EEE",
        path_name: "ElectricalElectronicsEngineering",
    },
    Department {
        name: "Mechanical Engineering",
        short_code: "MECH",
        path_name: "MechanicalEngineering",
    },
    Department {
        name: "Civil Engineering",
        short_code: "CIVIL",
        path_name: "CivilEngineering",
    },
    Department {
        name: "Artificial Intelligence and Data Science",
        short_code: "AIDS",
        path_name: "ArtificialIntelligenceDataScience",
    },
    Department {
        name: "Artificial Intelligence and Machine Learning",
        short_code: "AIML",
        path_name: "ArtificialIntelligenceMachineLearning",
    },
    Department {
        name: "Computer Science and Business Systems",
        short_code: "CSBS",
        path_name: "ComputerScienceBusinessSystems",
    },
    Department {
        name: "Biomedical Engineering",
        short_code: "BME",
        path_name: "BiomedicalEngineering",
    },
    Department {
        name: "Biotechnology",
        short_code: "BT",
        path_name: "Biotechnology",
    },
    Department {
        name: "Chemical Engineering",
        short_code: "CHEM",
        path_name: "ChemicalEngineering",
    },
    Department {
        name: "Master of Business Administration",
        short_code: "MBA",
        path_name: "MasterBusinessAdministration",
    },
    Department {
        name: "Master of Computer Applications",
        short_code: "MCA",
        path_name: "MasterComputerApplications",
    },
];

/// Department display names, in catalog order. Used as the option set of the
/// `department` select field.
pub const DEPARTMENT_NAMES: [&str; 14] = [
    "Computer Science and Engineering",
    "Information Technology",
    "Electronics and Communication Engineering",
    "Electrical and Electronics Engineering",
    "Mechanical Engineering",
    "Civil Engineering",
    "Artificial Intelligence and Data Science",
    "Artificial Intelligence and Machine Learning",
    "Computer Science and Business Systems",
    "Biomedical Engineering",
    "Biotechnology",
    "Chemical Engineering",
    "Master of Business Administration",
    "Master of Computer Applications",
];

pub const UNKNOWN_SHORT_CODE: &str = "UNKNOWN";
pub const UNKNOWN_PATH_NAME: &str = "Unknown";

/// Finds a department by display name or short code, case-insensitively.
pub fn find_department(value: &str) -> Option<&'static Department> {
    let needle = value.trim();
    if needle.is_empty() {
        return None;
    }
    DEPARTMENTS.iter().find(|dept| {
        dept.name.eq_ignore_ascii_case(needle) || dept.short_code.eq_ignore_ascii_case(needle)
    })
}

/// Short code for a department, `UNKNOWN` when it is not in the catalog.
pub fn short_code(value: &str) -> &'static str {
    find_department(value).map_or(UNKNOWN_SHORT_CODE, |dept| dept.short_code)
}

/// Path-safe name for a department, `Unknown` when it is not in the catalog.
pub fn path_name(value: &str) -> &'static str {
    find_department(value).map_or(UNKNOWN_PATH_NAME, |dept| dept.path_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_catalog_order() {
        let names: Vec<&str> = DEPARTMENTS.iter().map(|d| d.name).collect();
        assert_eq!(names, DEPARTMENT_NAMES);
    }

    #[test]
    fn path_names_are_alphanumeric() {
        for dept in &DEPARTMENTS {
            assert!(dept.path_name.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn lookup_by_name_or_code() {
        assert_eq!(short_code("computer science and engineering"), "CSE");
        assert_eq!(short_code("ece"), "ECE");
        assert_eq!(path_name("MBA"), "MasterBusinessAdministration");
        assert_eq!(short_code("Philosophy"), UNKNOWN_SHORT_CODE);
        assert_eq!(path_name(""), UNKNOWN_PATH_NAME);
    }
}
