use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::role::RoleListParams;
use crate::forms::role::DeleteRoleForm;
use crate::models::config::ServerConfig;
use crate::nav;
use crate::nav::prefs::{PreferencesStore, SessionPreferencesStore};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::resolve_access;
use crate::services::role as role_service;

#[get("/roles")]
pub async fn show_roles(
    params: web::Query<RoleListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match role_service::load_list_page(repo.get_ref(), &user, &access, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "roles",
                &server_config.auth_service_url,
            );
            context.insert("roles", &data.roles);
            context.insert("stats", &data.stats);
            context.insert("search_query", &data.search.as_deref().unwrap_or(""));
            context.insert("selected_type", &data.selected_type.as_deref().unwrap_or(""));
            context.insert("selected_permission", &data.selected_permission.as_deref().unwrap_or(""));
            context.insert("known_permissions", &nav::KNOWN_PERMISSIONS);
            context.insert("can_manage", &access.allows(&["roles.manage"]));

            render_template(&tera, "roles/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[get("/roles/permissions")]
pub async fn show_permission_matrix(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match role_service::load_permission_matrix(repo.get_ref(), &user, &access) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "roles",
                &server_config.auth_service_url,
            );
            context.insert("matrix", &data.rows);

            render_template(&tera, "roles/permissions.html", &context)
        }
        Err(err) => service_error_response(err, "/roles"),
    }
}

#[get("/roles/{role_id}")]
pub async fn show_role(
    role_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match role_service::load_detail_page(repo.get_ref(), &user, &access, role_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "roles",
                &server_config.auth_service_url,
            );
            context.insert("role", &data.role);
            context.insert("known_permissions", &nav::KNOWN_PERMISSIONS);
            context.insert("can_manage", &access.allows(&["roles.manage"]));

            render_template(&tera, "roles/detail.html", &context)
        }
        Err(err) => service_error_response(err, "/roles"),
    }
}

#[post("/roles/add")]
pub async fn add_role(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match role_service::add_role_from_bytes(repo.get_ref(), &user, &access, &body) {
        Ok(_) => {
            FlashMessage::success("Role added.").send();
            redirect("/roles")
        }
        Err(err) => service_error_response(err, "/roles"),
    }
}

#[post("/roles/save")]
pub async fn save_role(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match role_service::update_role_from_bytes(repo.get_ref(), &user, &access, &body) {
        Ok(_) => {
            FlashMessage::success("Role updated.").send();
            redirect("/roles")
        }
        Err(err) => service_error_response(err, "/roles"),
    }
}

#[post("/roles/delete")]
pub async fn delete_role(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteRoleForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match role_service::delete_role(repo.get_ref(), &user, &access, form.id) {
        Ok(()) => {
            FlashMessage::success("Role deleted.").send();
            redirect("/roles")
        }
        Err(err) => service_error_response(err, "/roles"),
    }
}
