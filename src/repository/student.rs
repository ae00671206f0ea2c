//! Repository implementation for enrolled students.

use diesel::prelude::*;

use crate::domain::student::{NewStudent, Student, UpdateStudent};
use crate::models::student::{
    NewStudent as DbNewStudent, Student as DbStudent, UpdateStudent as DbUpdateStudent,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, StudentListQuery, StudentReader, StudentWriter};

impl StudentReader for DieselRepository {
    fn get_student_by_id(&self, id: i32, school_id: i32) -> RepositoryResult<Option<Student>> {
        use crate::schema::students;

        let mut conn = self.conn()?;
        let db_student = students::table
            .filter(students::id.eq(id))
            .filter(students::school_id.eq(school_id))
            .first::<DbStudent>(&mut conn)
            .optional()?;

        match db_student {
            Some(db_student) => Ok(Some(
                Student::try_from(db_student).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_students(&self, query: StudentListQuery) -> RepositoryResult<(usize, Vec<Student>)> {
        use crate::schema::students;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = students::table
                .filter(students::school_id.eq(query.school_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                items = items.filter(
                    students::name
                        .like(pattern.clone())
                        .or(students::nisn.like(pattern)),
                );
            }
            if let Some(grade) = &query.grade {
                items = items.filter(students::grade.eq(grade.clone()));
            }
            if let Some(gender) = query.gender {
                items = items.filter(students::gender.eq(gender.as_str()));
            }
            if let Some(active) = query.active {
                items = items.filter(students::active.eq(active));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let students = items
            .order(students::name.asc())
            .load::<DbStudent>(&mut conn)?
            .into_iter()
            .map(|db_student| Student::try_from(db_student).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, students))
    }
}

impl StudentWriter for DieselRepository {
    fn create_student(&self, new_student: &NewStudent) -> RepositoryResult<Student> {
        use crate::schema::students;

        let mut conn = self.conn()?;
        let db_new_student: DbNewStudent = new_student.into();

        let created = diesel::insert_into(students::table)
            .values(&db_new_student)
            .get_result::<DbStudent>(&mut conn)?;

        Ok(Student::try_from(created).map_err(RepositoryError::from)?)
    }

    fn update_student(
        &self,
        student_id: i32,
        updates: &UpdateStudent,
    ) -> RepositoryResult<Student> {
        use crate::schema::students;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateStudent = updates.into();

        let updated = diesel::update(students::table.find(student_id))
            .set((&db_updates, students::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbStudent>(&mut conn)?;

        Ok(Student::try_from(updated).map_err(RepositoryError::from)?)
    }

    fn delete_student(&self, student_id: i32) -> RepositoryResult<()> {
        use crate::schema::students;

        let mut conn = self.conn()?;
        let affected = diesel::delete(students::table.find(student_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
