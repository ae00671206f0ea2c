//! JSON API consumed by dashboard widgets and integrations.
//!
//! Every list endpoint speaks the same dialect: `page`/`limit`/`search`
//! query parameters plus entity filters, where a filter valued `"all"` means
//! unconstrained, and a `{success, data, pagination}` envelope in response.

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::api::{ApiErrorResponse, ApiItemResponse, ApiListResponse, ApiStatusResponse};
use crate::dto::role::RoleListParams;
use crate::dto::student::StudentListParams;
use crate::dto::supplier::SupplierListParams;
use crate::dto::waste::WasteListParams;
use crate::forms::role::{AddRoleForm, SaveRoleForm};
use crate::forms::student::{AddStudentForm, SaveStudentForm};
use crate::forms::supplier::{AddSupplierForm, SaveSupplierForm};
use crate::forms::waste::{AddWasteRecordForm, SaveWasteRecordForm};
use crate::repository::DieselRepository;
use crate::services::{
    ServiceError, resolve_access, role as role_service, student as student_service,
    supplier as supplier_service, waste as waste_service,
};

fn api_error(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ApiErrorResponse::new("Insufficient permissions"))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ApiErrorResponse::new("Not found"))
        }
        ServiceError::Form(message) => {
            HttpResponse::BadRequest().json(ApiErrorResponse::new(message))
        }
        ServiceError::Repository(err) => {
            log::error!("Repository failure: {err}");
            HttpResponse::InternalServerError().json(ApiErrorResponse::new("Internal server error"))
        }
    }
}

#[get("/v1/roles")]
pub async fn list_roles(
    params: web::Query<RoleListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match role_service::list_roles(repo.get_ref(), &user, &access, &params) {
        Ok((roles, info)) => HttpResponse::Ok().json(ApiListResponse::new(roles, info)),
        Err(err) => api_error(err),
    }
}

#[get("/v1/roles/{role_id}")]
pub async fn get_role(
    role_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match role_service::get_role(repo.get_ref(), &user, &access, role_id.into_inner()) {
        Ok(role) => HttpResponse::Ok().json(ApiItemResponse::new(role)),
        Err(err) => api_error(err),
    }
}

#[post("/v1/roles")]
pub async fn create_role(
    body: web::Json<AddRoleForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match role_service::add_role(repo.get_ref(), &user, &access, body.into_inner()) {
        Ok(role) => HttpResponse::Created().json(ApiItemResponse::new(role)),
        Err(err) => api_error(err),
    }
}

#[put("/v1/roles/{role_id}")]
pub async fn update_role(
    role_id: web::Path<i32>,
    body: web::Json<SaveRoleForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let mut form = body.into_inner();
    form.id = role_id.into_inner();

    match role_service::update_role(repo.get_ref(), &user, &access, form) {
        Ok(role) => HttpResponse::Ok().json(ApiItemResponse::new(role)),
        Err(err) => api_error(err),
    }
}

#[delete("/v1/roles/{role_id}")]
pub async fn delete_role(
    role_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match role_service::delete_role(repo.get_ref(), &user, &access, role_id.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(ApiStatusResponse::ok()),
        Err(err) => api_error(err),
    }
}

#[get("/v1/students")]
pub async fn list_students(
    params: web::Query<StudentListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match student_service::list_students(repo.get_ref(), &user, &access, &params) {
        Ok((students, info)) => HttpResponse::Ok().json(ApiListResponse::new(students, info)),
        Err(err) => api_error(err),
    }
}

#[get("/v1/students/{student_id}")]
pub async fn get_student(
    student_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match student_service::get_student(repo.get_ref(), &user, &access, student_id.into_inner()) {
        Ok(student) => HttpResponse::Ok().json(ApiItemResponse::new(student)),
        Err(err) => api_error(err),
    }
}

#[post("/v1/students")]
pub async fn create_student(
    body: web::Json<AddStudentForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match student_service::add_student(repo.get_ref(), &user, &access, body.into_inner()) {
        Ok(student) => HttpResponse::Created().json(ApiItemResponse::new(student)),
        Err(err) => api_error(err),
    }
}

#[put("/v1/students/{student_id}")]
pub async fn update_student(
    student_id: web::Path<i32>,
    body: web::Json<SaveStudentForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let mut form = body.into_inner();
    form.id = student_id.into_inner();

    match student_service::update_student(repo.get_ref(), &user, &access, form) {
        Ok(student) => HttpResponse::Ok().json(ApiItemResponse::new(student)),
        Err(err) => api_error(err),
    }
}

#[delete("/v1/students/{student_id}")]
pub async fn delete_student(
    student_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match student_service::delete_student(repo.get_ref(), &user, &access, student_id.into_inner())
    {
        Ok(()) => HttpResponse::Ok().json(ApiStatusResponse::ok()),
        Err(err) => api_error(err),
    }
}

#[get("/v1/suppliers")]
pub async fn list_suppliers(
    params: web::Query<SupplierListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match supplier_service::list_suppliers(repo.get_ref(), &user, &access, &params) {
        Ok((suppliers, info)) => HttpResponse::Ok().json(ApiListResponse::new(suppliers, info)),
        Err(err) => api_error(err),
    }
}

#[get("/v1/suppliers/{supplier_id}")]
pub async fn get_supplier(
    supplier_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match supplier_service::get_supplier(repo.get_ref(), &user, &access, supplier_id.into_inner())
    {
        Ok(supplier) => HttpResponse::Ok().json(ApiItemResponse::new(supplier)),
        Err(err) => api_error(err),
    }
}

#[post("/v1/suppliers")]
pub async fn create_supplier(
    body: web::Json<AddSupplierForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match supplier_service::add_supplier(repo.get_ref(), &user, &access, body.into_inner()) {
        Ok(supplier) => HttpResponse::Created().json(ApiItemResponse::new(supplier)),
        Err(err) => api_error(err),
    }
}

#[put("/v1/suppliers/{supplier_id}")]
pub async fn update_supplier(
    supplier_id: web::Path<i32>,
    body: web::Json<SaveSupplierForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let mut form = body.into_inner();
    form.id = supplier_id.into_inner();

    match supplier_service::update_supplier(repo.get_ref(), &user, &access, form) {
        Ok(supplier) => HttpResponse::Ok().json(ApiItemResponse::new(supplier)),
        Err(err) => api_error(err),
    }
}

#[delete("/v1/suppliers/{supplier_id}")]
pub async fn delete_supplier(
    supplier_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match supplier_service::delete_supplier(
        repo.get_ref(),
        &user,
        &access,
        supplier_id.into_inner(),
    ) {
        Ok(()) => HttpResponse::Ok().json(ApiStatusResponse::ok()),
        Err(err) => api_error(err),
    }
}

#[get("/v1/waste-records")]
pub async fn list_waste_records(
    params: web::Query<WasteListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match waste_service::list_waste_records(repo.get_ref(), &user, &access, &params) {
        Ok((records, info)) => HttpResponse::Ok().json(ApiListResponse::new(records, info)),
        Err(err) => api_error(err),
    }
}

#[get("/v1/waste-records/{record_id}")]
pub async fn get_waste_record(
    record_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match waste_service::get_waste_record(repo.get_ref(), &user, &access, record_id.into_inner())
    {
        Ok(record) => HttpResponse::Ok().json(ApiItemResponse::new(record)),
        Err(err) => api_error(err),
    }
}

#[post("/v1/waste-records")]
pub async fn create_waste_record(
    body: web::Json<AddWasteRecordForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match waste_service::add_waste_record(repo.get_ref(), &user, &access, body.into_inner()) {
        Ok(record) => HttpResponse::Created().json(ApiItemResponse::new(record)),
        Err(err) => api_error(err),
    }
}

#[put("/v1/waste-records/{record_id}")]
pub async fn update_waste_record(
    record_id: web::Path<i32>,
    body: web::Json<SaveWasteRecordForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let mut form = body.into_inner();
    form.id = record_id.into_inner();

    match waste_service::update_waste_record(repo.get_ref(), &user, &access, form) {
        Ok(record) => HttpResponse::Ok().json(ApiItemResponse::new(record)),
        Err(err) => api_error(err),
    }
}

#[delete("/v1/waste-records/{record_id}")]
pub async fn delete_waste_record(
    record_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    match waste_service::delete_waste_record(
        repo.get_ref(),
        &user,
        &access,
        record_id.into_inner(),
    ) {
        Ok(()) => HttpResponse::Ok().json(ApiStatusResponse::ok()),
        Err(err) => api_error(err),
    }
}
