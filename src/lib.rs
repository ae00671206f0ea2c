#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware::Compress, middleware::Logger, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod listing;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod nav;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::api;
#[cfg(feature = "server")]
use crate::routes::main::{logout, not_assigned, save_menu_state, show_index};
#[cfg(feature = "server")]
use crate::routes::role::{
    add_role, delete_role, save_role, show_permission_matrix, show_role, show_roles,
};
#[cfg(feature = "server")]
use crate::routes::student::{
    add_student, delete_student, save_student, show_student, show_students,
};
#[cfg(feature = "server")]
use crate::routes::supplier::{
    add_supplier, delete_supplier, save_supplier, show_supplier, show_suppliers,
};
#[cfg(feature = "server")]
use crate::routes::waste::{
    add_waste_record, delete_waste_record, save_waste_record, show_waste_record,
    show_waste_records,
};

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(
                web::scope("/api")
                    .service(api::list_roles)
                    .service(api::get_role)
                    .service(api::create_role)
                    .service(api::update_role)
                    .service(api::delete_role)
                    .service(api::list_students)
                    .service(api::get_student)
                    .service(api::create_student)
                    .service(api::update_student)
                    .service(api::delete_student)
                    .service(api::list_suppliers)
                    .service(api::get_supplier)
                    .service(api::create_supplier)
                    .service(api::update_supplier)
                    .service(api::delete_supplier)
                    .service(api::list_waste_records)
                    .service(api::get_waste_record)
                    .service(api::create_waste_record)
                    .service(api::update_waste_record)
                    .service(api::delete_waste_record),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(not_assigned)
                    .service(save_menu_state)
                    .service(show_roles)
                    // Registered before `show_role` so the literal segment
                    // wins over the `{role_id}` capture.
                    .service(show_permission_matrix)
                    .service(show_role)
                    .service(add_role)
                    .service(save_role)
                    .service(delete_role)
                    .service(show_students)
                    .service(show_student)
                    .service(add_student)
                    .service(save_student)
                    .service(delete_student)
                    .service(show_suppliers)
                    .service(show_supplier)
                    .service(add_supplier)
                    .service(save_supplier)
                    .service(delete_supplier)
                    .service(show_waste_records)
                    .service(show_waste_record)
                    .service(add_waste_record)
                    .service(save_waste_record)
                    .service(delete_waste_record)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
