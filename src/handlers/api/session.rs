use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::auth::rate_limit::RateLimiter;
use crate::auth::session::{current_admin, sign_in, sign_out};
use crate::errors::AppError;
use crate::handlers::auth_handlers::TOO_MANY_ATTEMPTS;
use crate::handlers::client_ip;
use crate::models::admin;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    limiter: web::Data<RateLimiter>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(json!({ "message": "Username and password are required" })));
    }

    let ip = client_ip(&req);
    if limiter.is_blocked(ip) {
        return Ok(HttpResponse::TooManyRequests().json(json!({ "message": TOO_MANY_ATTEMPTS })));
    }

    match admin::authenticate(&pool, username, &body.password).await? {
        Some(found) => {
            limiter.clear(ip);
            let identity = sign_in(&session, &found)?;
            log::info!("Admin '{}' logged in through the API", identity.username);
            Ok(HttpResponse::Ok().json(json!({
                "message": "Login successful",
                "username": identity.username,
            })))
        }
        None => {
            limiter.record_failure(ip);
            log::warn!("Failed API login for '{username}'");
            Ok(HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" })))
        }
    }
}

pub async fn logout(session: Session) -> HttpResponse {
    sign_out(&session);
    HttpResponse::Ok().json(json!({ "message": "Logged out" }))
}

pub async fn check(session: Session) -> HttpResponse {
    match current_admin(&session) {
        Some(admin) => HttpResponse::Ok().json(json!({
            "admin": { "username": admin.username, "isLoggedIn": true }
        })),
        None => HttpResponse::Unauthorized().json(json!({ "message": "Not authenticated" })),
    }
}
