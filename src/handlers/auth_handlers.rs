use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::{csrf, rate_limit::RateLimiter, session};
use crate::errors::{AppError, render};
use crate::models::admin;
use crate::templates_structs::LoginTemplate;

use super::{CsrfOnly, client_ip};

pub const TOO_MANY_ATTEMPTS: &str = "Trop de tentatives de connexion. Réessayez plus tard.";
const INVALID_CREDENTIALS: &str = "Identifiants invalides.";

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

fn to_dashboard() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/dashboard"))
        .finish()
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if session::current_admin(&session).is_some() {
        return Ok(to_dashboard());
    }
    let csrf_token = csrf::get_or_create_token(&session);
    render(LoginTemplate::new(None, csrf_token))
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check before any database access
    let ip = client_ip(&req);
    if limiter.is_blocked(ip) {
        let csrf_token = csrf::get_or_create_token(&session);
        return render(LoginTemplate::new(Some(TOO_MANY_ATTEMPTS.to_string()), csrf_token));
    }

    match admin::authenticate(&pool, form.username.trim(), &form.password).await? {
        Some(found) => {
            limiter.clear(ip);
            session::sign_in(&session, &found)?;
            log::info!("Admin '{}' logged in", found.username);
            Ok(to_dashboard())
        }
        None => {
            limiter.record_failure(ip);
            log::warn!("Failed admin login for '{}'", form.username);
            let csrf_token = csrf::get_or_create_token(&session);
            render(LoginTemplate::new(Some(INVALID_CREDENTIALS.to_string()), csrf_token))
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session::sign_out(&session);
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/login"))
        .finish())
}
