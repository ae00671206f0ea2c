use crate::auth::AuthenticatedUser;
use crate::domain::student::{Student, is_valid_nisn};
use crate::dto::student::{
    StudentDetailPageData, StudentListParams, StudentPageStats, StudentsPageData,
};
use crate::forms::student::{AddStudentForm, SaveStudentForm};
use crate::listing::{PageInfo, PageStats};
use crate::nav::Access;
use crate::pagination::Paginated;
use crate::repository::{StudentReader, StudentWriter};
use crate::services::{
    ServiceError, ServiceResult, ensure_access, ensure_permission, map_write_error, validate_form,
};

pub fn list_students<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    params: &StudentListParams,
) -> ServiceResult<(Vec<Student>, PageInfo)>
where
    R: StudentReader + ?Sized,
{
    ensure_access(access, "/students")?;

    let query = params.to_query(user.school_id)?;
    let (total, students) = repo.list_students(query)?;
    let info = PageInfo::new(params.page(), params.limit(), total);
    Ok((students, info))
}

pub fn load_list_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    params: StudentListParams,
) -> ServiceResult<StudentsPageData>
where
    R: StudentReader + ?Sized,
{
    let (students, info) = list_students(repo, user, access, &params)?;
    let stats = StudentPageStats::from_page(&students);

    Ok(StudentsPageData {
        students: Paginated::new(students, &info),
        stats,
        search: params.search,
        selected_grade: params.grade,
        selected_gender: params.gender,
        selected_status: params.status,
    })
}

pub fn get_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    student_id: i32,
) -> ServiceResult<Student>
where
    R: StudentReader + ?Sized,
{
    ensure_access(access, "/students")?;
    repo.get_student_by_id(student_id, user.school_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn load_detail_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    student_id: i32,
) -> ServiceResult<StudentDetailPageData>
where
    R: StudentReader + ?Sized,
{
    let student = get_student(repo, user, access, student_id)?;
    Ok(StudentDetailPageData { student })
}

pub fn add_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    form: AddStudentForm,
) -> ServiceResult<Student>
where
    R: StudentWriter + ?Sized,
{
    ensure_permission(access, "students.manage")?;
    validate_form(&form)?;
    validate_nisn(&form.nisn)?;

    let new_student = form.to_new_student(user.school_id)?;
    repo.create_student(&new_student).map_err(map_write_error)
}

pub fn update_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    form: SaveStudentForm,
) -> ServiceResult<Student>
where
    R: StudentReader + StudentWriter + ?Sized,
{
    ensure_permission(access, "students.manage")?;
    validate_form(&form)?;
    validate_nisn(&form.nisn)?;

    repo.get_student_by_id(form.id, user.school_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form.to_update_student()?;
    repo.update_student(form.id, &updates)
        .map_err(map_write_error)
}

pub fn delete_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    student_id: i32,
) -> ServiceResult<()>
where
    R: StudentReader + StudentWriter + ?Sized,
{
    ensure_permission(access, "students.manage")?;

    repo.get_student_by_id(student_id, user.school_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.delete_student(student_id)?)
}

fn validate_nisn(nisn: &str) -> ServiceResult<()> {
    if is_valid_nisn(nisn.trim()) {
        Ok(())
    } else {
        Err(ServiceError::Form(
            "NISN must be exactly ten digits".to_string(),
        ))
    }
}
