pub mod admin_handlers;
pub mod api;
pub mod auth_handlers;
pub mod survey_handlers;

use std::net::{IpAddr, Ipv4Addr};

use actix_web::{web, HttpRequest, HttpResponse, middleware::from_fn};
use serde::Deserialize;

use crate::auth::middleware::require_auth;

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// Peer address used as the rate-limit key.
pub fn client_ip(req: &HttpRequest) -> IpAddr {
    req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../templates/errors/404.html"))
}

/// Every route of the service. Static files and the default 404 service
/// are added by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public survey
        .route("/", web::get().to(survey_handlers::show))
        .route("/survey/answer", web::post().to(survey_handlers::answer))
        .route("/survey/section", web::post().to(survey_handlers::section))
        .route("/survey/submit", web::post().to(survey_handlers::submit))
        // Admin session, registered before the guarded /admin scope
        .route("/admin/login", web::get().to(auth_handlers::login_page))
        .route("/admin/login", web::post().to(auth_handlers::login_submit))
        .route("/admin/logout", web::post().to(auth_handlers::logout))
        .configure(api::configure)
        .service(
            web::scope("/admin")
                .wrap(from_fn(require_auth))
                .route("", web::get().to(admin_handlers::index))
                .route("/dashboard", web::get().to(admin_handlers::dashboard))
                .route("/statistics", web::get().to(admin_handlers::statistics))
                .route("/export.csv", web::get().to(admin_handlers::export_csv))
                .route("/responses/{id}", web::get().to(admin_handlers::detail))
                .route("/responses/{id}/delete", web::post().to(admin_handlers::delete)),
        );
}
