use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::waste_record::WasteCategory;
use crate::dto::waste::WasteListParams;
use crate::forms::waste::{AddWasteRecordForm, DeleteWasteRecordForm, SaveWasteRecordForm};
use crate::models::config::ServerConfig;
use crate::nav::prefs::{PreferencesStore, SessionPreferencesStore};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::resolve_access;
use crate::services::waste as waste_service;

fn category_options() -> Vec<&'static str> {
    WasteCategory::ALL.iter().map(|c| c.as_str()).collect()
}

#[get("/waste")]
pub async fn show_waste_records(
    params: web::Query<WasteListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match waste_service::load_list_page(repo.get_ref(), &user, &access, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "waste",
                &server_config.auth_service_url,
            );
            context.insert("records", &data.records);
            context.insert("stats", &data.stats);
            context.insert("search_query", &data.search.as_deref().unwrap_or(""));
            context.insert("selected_category", &data.selected_category.as_deref().unwrap_or(""));
            context.insert("selected_source", &data.selected_source.as_deref().unwrap_or(""));
            context.insert("from", &data.from.as_deref().unwrap_or(""));
            context.insert("until", &data.until.as_deref().unwrap_or(""));
            context.insert("categories", &category_options());
            context.insert("can_manage", &access.allows(&["waste.manage"]));

            render_template(&tera, "waste/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[get("/waste/{record_id}")]
pub async fn show_waste_record(
    record_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match waste_service::load_detail_page(repo.get_ref(), &user, &access, record_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "waste",
                &server_config.auth_service_url,
            );
            context.insert("record", &data.record);
            context.insert("categories", &category_options());
            context.insert("can_manage", &access.allows(&["waste.manage"]));

            render_template(&tera, "waste/detail.html", &context)
        }
        Err(err) => service_error_response(err, "/waste"),
    }
}

#[post("/waste/add")]
pub async fn add_waste_record(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddWasteRecordForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match waste_service::add_waste_record(repo.get_ref(), &user, &access, form) {
        Ok(_) => {
            FlashMessage::success("Waste record added.").send();
            redirect("/waste")
        }
        Err(err) => service_error_response(err, "/waste"),
    }
}

#[post("/waste/save")]
pub async fn save_waste_record(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveWasteRecordForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match waste_service::update_waste_record(repo.get_ref(), &user, &access, form) {
        Ok(_) => {
            FlashMessage::success("Waste record updated.").send();
            redirect("/waste")
        }
        Err(err) => service_error_response(err, "/waste"),
    }
}

#[post("/waste/delete")]
pub async fn delete_waste_record(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteWasteRecordForm>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);

    match waste_service::delete_waste_record(repo.get_ref(), &user, &access, form.id) {
        Ok(()) => {
            FlashMessage::success("Waste record removed.").send();
            redirect("/waste")
        }
        Err(err) => service_error_response(err, "/waste"),
    }
}
