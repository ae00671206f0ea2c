use serde::Deserialize;
use validator::Validate;

use crate::domain::student::{Gender, NewStudent, UpdateStudent};
use crate::forms::FormParseError;

#[derive(Deserialize, Validate)]
/// Form data for enrolling a student.
pub struct AddStudentForm {
    #[validate(length(equal = 10))]
    pub nisn: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 16))]
    pub grade: String,
    pub gender: String,
    #[serde(default)]
    pub allergies: String,
}

impl AddStudentForm {
    pub fn to_new_student(&self, school_id: i32) -> Result<NewStudent, FormParseError> {
        let gender = Gender::try_from(self.gender.as_str())?;
        Ok(NewStudent::new(
            school_id,
            self.nisn.clone(),
            self.name.clone(),
            self.grade.clone(),
            gender,
            Some(self.allergies.clone()),
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing student.
pub struct SaveStudentForm {
    /// Ignored by the JSON API, which takes the id from the path.
    #[serde(default)]
    pub id: i32,
    #[validate(length(equal = 10))]
    pub nisn: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 16))]
    pub grade: String,
    pub gender: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub active: bool,
}

impl SaveStudentForm {
    pub fn to_update_student(&self) -> Result<UpdateStudent, FormParseError> {
        let gender = Gender::try_from(self.gender.as_str())?;
        Ok(UpdateStudent::new(
            self.nisn.clone(),
            self.name.clone(),
            self.grade.clone(),
            gender,
            Some(self.allergies.clone()),
            self.active,
        ))
    }
}

#[derive(Deserialize)]
pub struct DeleteStudentForm {
    pub id: i32,
}
