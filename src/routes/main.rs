use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::api::{ApiErrorResponse, ApiStatusResponse};
use crate::models::config::ServerConfig;
use crate::nav::prefs::{MenuState, PreferencesStore, SessionPreferencesStore};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::main as main_service;
use crate::services::resolve_access;

#[get("/")]
pub async fn show_index(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let access = resolve_access(repo.get_ref(), &user);
    let menu_state = SessionPreferencesStore::new(&session).load();

    match main_service::load_dashboard(repo.get_ref(), &user, Utc::now().date_naive()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                &access,
                &menu_state,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("totals", &data.totals);
            context.insert("window", &data.window);

            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => service_error_response(err, "/na"),
    }
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    // No permissions resolved here on purpose: the page is the landing spot
    // for users without any assigned role.
    let context = base_context(
        &flash_messages,
        &user,
        &crate::nav::Access::Pending,
        &MenuState::default(),
        "na",
        &server_config.auth_service_url,
    );

    render_template(&tera, "main/not_assigned.html", &context)
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}

/// AJAX endpoint the sidebar posts its expansion state to.
#[post("/menu/state")]
pub async fn save_menu_state(
    _user: AuthenticatedUser,
    session: Session,
    state: web::Json<MenuState>,
) -> impl Responder {
    let store = SessionPreferencesStore::new(&session);
    match main_service::save_menu_state(&store, &state) {
        Ok(()) => HttpResponse::Ok().json(ApiStatusResponse::ok()),
        Err(err) => {
            HttpResponse::BadRequest().json(ApiErrorResponse::new(err.to_string()))
        }
    }
}
