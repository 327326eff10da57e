use std::net::TcpListener;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, dev::Server, web, App, HttpServer};
use secrecy::{ExposeSecret, SecretString};
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::Settings,
    routes::{
        authentication,
        error::{json_payload_error, path_error, query_payload_error},
        health_check,
        menu,
        order,
        transaction,
        users
    },
    utils::{get_connection_pool, DbPool}
};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    pub fn build(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = get_connection_pool(&settings.database);

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))?;
        let port = listener.local_addr()?.port();

        let server = run(
            listener,
            pool,
            settings.application.session_key,
            settings.application.secure_cookies
        )?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }
}

pub fn run(
    listener: TcpListener,
    pool: DbPool,
    session_key: SecretString,
    secure_cookies: bool
) -> Result<Server, anyhow::Error>{
    let key = Key::try_from(session_key.expose_secret().as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid session key: {}", e))?;
    let pool = web::Data::new(pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(secure_cookies)
                    .build()
            )
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(web::JsonConfig::default().error_handler(json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(query_payload_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(authentication::login))
                    .route("/logout", web::post().to(authentication::logout))
                    .route("/me", web::get().to(authentication::me))
            )
            .service(
                web::scope("/menu")
                    .route("", web::get().to(menu::list_menu_items))
                    .route("", web::post().to(menu::create_menu_item))
                    .route("/{id}", web::get().to(menu::get_menu_item))
                    .route("/{id}", web::put().to(menu::update_menu_item))
                    .route("/{id}", web::patch().to(menu::update_menu_item))
                    .route("/{id}", web::delete().to(menu::delete_menu_item))
                    .route("/{id}/toggle_availability", web::patch().to(menu::toggle_availability))
            )
            .service(
                web::scope("/orders")
                    .route("", web::get().to(order::list_orders))
                    .route("", web::post().to(order::create_order))
                    .route("/{id}", web::get().to(order::get_order))
                    .route("/{id}", web::patch().to(order::update_order))
                    .route("/{id}", web::delete().to(order::delete_order))
                    .route("/{id}/items", web::post().to(order::add_order_item))
                    .route("/{id}/items/{item_id}", web::patch().to(order::update_order_item))
                    .route("/{id}/items/{item_id}", web::delete().to(order::delete_order_item))
            )
            .service(
                web::scope("/transactions")
                    .route("", web::get().to(transaction::list_transactions))
                    .route("", web::post().to(transaction::create_transaction))
                    .route("/{id}", web::get().to(transaction::get_transaction))
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list_users))
                    .route("", web::post().to(users::create_user))
                    .route("/{id}", web::get().to(users::get_user))
                    .route("/{id}", web::patch().to(users::update_user))
                    .route("/{id}", web::delete().to(users::delete_user))
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
