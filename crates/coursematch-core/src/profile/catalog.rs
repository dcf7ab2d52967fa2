//! Grade labels and the suggested subject list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Subjects offered as one-tap suggestions. Free-text subjects are allowed too.
pub const COMMON_SUBJECTS: &[&str] = &[
    "Mathematics",
    "English",
    "Science",
    "History",
    "Geography",
    "Physics",
    "Chemistry",
    "Biology",
    "Computer Science",
    "Art",
    "Music",
    "Physical Education",
    "Foreign Language",
    "Economics",
    "Psychology",
    "Literature",
    "Philosophy",
    "Statistics",
];

/// Letter grade for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[default]
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Best to worst.
    pub const ALL: [Grade; 11] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::D,
        Grade::F,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Grade::ALL
            .into_iter()
            .find(|g| g.label() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "grade".into(),
                message: format!(
                    "'{}' is not a grade (expected one of {})",
                    s.trim(),
                    Grade::ALL.map(Grade::label).join(", ")
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grade_is_b() {
        assert_eq!(Grade::default(), Grade::B);
    }

    #[test]
    fn grade_parses_case_insensitively() {
        assert_eq!("a+".parse::<Grade>().unwrap(), Grade::APlus);
        assert_eq!(" c- ".parse::<Grade>().unwrap(), Grade::CMinus);
        assert!("E".parse::<Grade>().is_err());
    }

    #[test]
    fn grade_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Grade::BPlus).unwrap(), "\"B+\"");
        let g: Grade = serde_json::from_str("\"F\"").unwrap();
        assert_eq!(g, Grade::F);
    }
}
