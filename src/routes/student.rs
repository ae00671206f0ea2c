use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::student::StudentListParams;
use crate::forms::student::{AddStudentForm, DeleteStudentForm, SaveStudentForm};
use crate::models::config::ServerConfig;
use crate::nav::prefs::{PreferencesStore, SessionPreferencesStore};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::resolve_access;
use crate::services::student as student_service;

#[get("/students")]
pub async fn show_students(
    params: web::Query<StudentListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match student_service::load_list_page(repo.get_ref(), &user, &access, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "students",
                &server_config.auth_service_url,
            );
            context.insert("students", &data.students);
            context.insert("stats", &data.stats);
            context.insert("search_query", &data.search.as_deref().unwrap_or(""));
            context.insert("selected_grade", &data.selected_grade.as_deref().unwrap_or(""));
            context.insert("selected_gender", &data.selected_gender.as_deref().unwrap_or(""));
            context.insert("selected_status", &data.selected_status.as_deref().unwrap_or(""));
            context.insert("can_manage", &access.allows(&["students.manage"]));

            render_template(&tera, "students/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[get("/students/{student_id}")]
pub async fn show_student(
    student_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match student_service::load_detail_page(repo.get_ref(), &user, &access, student_id.into_inner())
    {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "students",
                &server_config.auth_service_url,
            );
            context.insert("student", &data.student);
            context.insert("can_manage", &access.allows(&["students.manage"]));

            render_template(&tera, "students/detail.html", &context)
        }
        Err(err) => service_error_response(err, "/students"),
    }
}

#[post("/students/add")]
pub async fn add_student(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddStudentForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match student_service::add_student(repo.get_ref(), &user, &access, form) {
        Ok(_) => {
            FlashMessage::success("Student added.").send();
            redirect("/students")
        }
        Err(err) => service_error_response(err, "/students"),
    }
}

#[post("/students/save")]
pub async fn save_student(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveStudentForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match student_service::update_student(repo.get_ref(), &user, &access, form) {
        Ok(_) => {
            FlashMessage::success("Student updated.").send();
            redirect("/students")
        }
        Err(err) => service_error_response(err, "/students"),
    }
}

#[post("/students/delete")]
pub async fn delete_student(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteStudentForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match student_service::delete_student(repo.get_ref(), &user, &access, form.id) {
        Ok(()) => {
            FlashMessage::success("Student removed.").send();
            redirect("/students")
        }
        Err(err) => service_error_response(err, "/students"),
    }
}
