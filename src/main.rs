use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use sondage::auth::rate_limit::RateLimiter;
use sondage::config::Config;
use sondage::errors::StartupError;
use sondage::survey::{FormRegistry, MEAL_SURVEY};
use sondage::{db, handlers};

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    env_logger::init();

    let config = Config::from_env()?;
    let pool = db::setup(&config).await?;

    let registry = web::Data::new(FormRegistry::new(&MEAL_SURVEY));
    let limiter = web::Data::new(RateLimiter::default());
    let secret_key = config.session_key.clone();
    let cookie_secure = config.cookie_secure;

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(registry.clone())
            .app_data(limiter.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
