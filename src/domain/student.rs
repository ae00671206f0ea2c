use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: i32,
    pub school_id: i32,
    /// National student number, exactly ten ASCII digits.
    pub nisn: String,
    pub name: String,
    pub grade: String,
    pub gender: Gender,
    pub allergies: Option<String>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Gender {
    type Error = UnknownVariant;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(UnknownVariant::new("gender", other)),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewStudent {
    pub school_id: i32,
    pub nisn: String,
    pub name: String,
    pub grade: String,
    pub gender: Gender,
    pub allergies: Option<String>,
    pub active: bool,
}

impl NewStudent {
    #[must_use]
    pub fn new(
        school_id: i32,
        nisn: String,
        name: String,
        grade: String,
        gender: Gender,
        allergies: Option<String>,
    ) -> Self {
        Self {
            school_id,
            nisn: nisn.trim().to_string(),
            name: name.trim().to_string(),
            grade: grade.trim().to_string(),
            gender,
            allergies: allergies
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            active: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateStudent {
    pub nisn: String,
    pub name: String,
    pub grade: String,
    pub gender: Gender,
    pub allergies: Option<String>,
    pub active: bool,
}

impl UpdateStudent {
    #[must_use]
    pub fn new(
        nisn: String,
        name: String,
        grade: String,
        gender: Gender,
        allergies: Option<String>,
        active: bool,
    ) -> Self {
        Self {
            nisn: nisn.trim().to_string(),
            name: name.trim().to_string(),
            grade: grade.trim().to_string(),
            gender,
            allergies: allergies
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            active,
        }
    }
}

/// Checks the ten-digit national student number format.
pub fn is_valid_nisn(nisn: &str) -> bool {
    nisn.len() == 10 && nisn.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nisn_format() {
        assert!(is_valid_nisn("0061231234"));
        assert!(!is_valid_nisn("006123123"));
        assert!(!is_valid_nisn("00612312345"));
        assert!(!is_valid_nisn("00612x1234"));
        assert!(!is_valid_nisn(""));
    }

    #[test]
    fn new_student_drops_blank_allergies() {
        let student = NewStudent::new(
            1,
            " 0061231234 ".to_string(),
            "Sari".to_string(),
            "4A".to_string(),
            Gender::Female,
            Some("   ".to_string()),
        );
        assert_eq!(student.nisn, "0061231234");
        assert_eq!(student.allergies, None);
        assert!(student.active);
    }
}
