use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownVariant;
use crate::domain::student::{
    Gender, NewStudent as DomainNewStudent, Student as DomainStudent,
    UpdateStudent as DomainUpdateStudent,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::students)]
/// Diesel model for [`crate::domain::student::Student`].
pub struct Student {
    pub id: i32,
    pub school_id: i32,
    pub nisn: String,
    pub name: String,
    pub grade: String,
    pub gender: String,
    pub allergies: Option<String>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::students)]
/// Insertable form of [`Student`].
pub struct NewStudent<'a> {
    pub school_id: i32,
    pub nisn: &'a str,
    pub name: &'a str,
    pub grade: &'a str,
    pub gender: &'a str,
    pub allergies: Option<&'a str>,
    pub active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::students)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Student`] record.
pub struct UpdateStudent<'a> {
    pub nisn: &'a str,
    pub name: &'a str,
    pub grade: &'a str,
    pub gender: &'a str,
    pub allergies: Option<&'a str>,
    pub active: bool,
}

impl TryFrom<Student> for DomainStudent {
    type Error = UnknownVariant;

    fn try_from(student: Student) -> Result<Self, Self::Error> {
        let gender = Gender::try_from(student.gender.as_str())?;

        Ok(Self {
            id: student.id,
            school_id: student.school_id,
            nisn: student.nisn,
            name: student.name,
            grade: student.grade,
            gender,
            allergies: student.allergies,
            active: student.active,
            created_at: student.created_at,
            updated_at: student.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewStudent> for NewStudent<'a> {
    fn from(student: &'a DomainNewStudent) -> Self {
        Self {
            school_id: student.school_id,
            nisn: student.nisn.as_str(),
            name: student.name.as_str(),
            grade: student.grade.as_str(),
            gender: student.gender.as_str(),
            allergies: student.allergies.as_deref(),
            active: student.active,
        }
    }
}

impl<'a> From<&'a DomainUpdateStudent> for UpdateStudent<'a> {
    fn from(student: &'a DomainUpdateStudent) -> Self {
        Self {
            nisn: student.nisn.as_str(),
            name: student.name.as_str(),
            grade: student.grade.as_str(),
            gender: student.gender.as_str(),
            allergies: student.allergies.as_deref(),
            active: student.active,
        }
    }
}
