use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::supplier::SupplierCategory;
use crate::dto::supplier::SupplierListParams;
use crate::forms::supplier::{AddSupplierForm, DeleteSupplierForm, SaveSupplierForm};
use crate::models::config::ServerConfig;
use crate::nav::prefs::{PreferencesStore, SessionPreferencesStore};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::resolve_access;
use crate::services::supplier as supplier_service;

fn category_options() -> Vec<&'static str> {
    SupplierCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect()
}

#[get("/suppliers")]
pub async fn show_suppliers(
    params: web::Query<SupplierListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match supplier_service::load_list_page(repo.get_ref(), &user, &access, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "suppliers",
                &server_config.auth_service_url,
            );
            context.insert("suppliers", &data.suppliers);
            context.insert("stats", &data.stats);
            context.insert("search_query", &data.search.as_deref().unwrap_or(""));
            context.insert("selected_category", &data.selected_category.as_deref().unwrap_or(""));
            context.insert("selected_status", &data.selected_status.as_deref().unwrap_or(""));
            context.insert("categories", &category_options());
            context.insert("can_manage", &access.allows(&["suppliers.manage"]));

            render_template(&tera, "suppliers/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[get("/suppliers/{supplier_id}")]
pub async fn show_supplier(
    supplier_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match supplier_service::load_detail_page(
        repo.get_ref(),
        &user,
        &access,
        supplier_id.into_inner(),
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "suppliers",
                &server_config.auth_service_url,
            );
            context.insert("supplier", &data.supplier);
            context.insert("categories", &category_options());
            context.insert("can_manage", &access.allows(&["suppliers.manage"]));

            render_template(&tera, "suppliers/detail.html", &context)
        }
        Err(err) => service_error_response(err, "/suppliers"),
    }
}

#[post("/suppliers/add")]
pub async fn add_supplier(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddSupplierForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match supplier_service::add_supplier(repo.get_ref(), &user, &access, form) {
        Ok(_) => {
            FlashMessage::success("Supplier added.").send();
            redirect("/suppliers")
        }
        Err(err) => service_error_response(err, "/suppliers"),
    }
}

#[post("/suppliers/save")]
pub async fn save_supplier(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveSupplierForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match supplier_service::update_supplier(repo.get_ref(), &user, &access, form) {
        Ok(_) => {
            FlashMessage::success("Supplier updated.").send();
            redirect("/suppliers")
        }
        Err(err) => service_error_response(err, "/suppliers"),
    }
}

#[post("/suppliers/delete")]
pub async fn delete_supplier(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteSupplierForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match supplier_service::delete_supplier(repo.get_ref(), &user, &access, form.id) {
        Ok(()) => {
            FlashMessage::success("Supplier removed.").send();
            redirect("/suppliers")
        }
        Err(err) => service_error_response(err, "/suppliers"),
    }
}
