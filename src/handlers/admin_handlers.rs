use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::{FlashLevel, require_admin, set_flash};
use crate::errors::{AppError, render};
use crate::models::response;
use crate::survey::aggregate::Statistics;
use crate::templates_structs::{
    DashboardTemplate, PageContext, ResponseDetailTemplate, ResponseRow, StatisticsTemplate,
    script_json,
};

use super::CsrfOnly;

pub const NOTHING_TO_EXPORT: &str = "Aucune réponse à exporter.";

fn to_dashboard() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/dashboard"))
        .finish()
}

pub async fn index() -> HttpResponse {
    to_dashboard()
}

pub async fn dashboard(
    pool: web::Data<PgPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let admin = require_admin(&session)?;
    let ctx = PageContext::build(&session, &admin, "dashboard")?;
    let responses = response::find_all(&pool).await?;
    render(DashboardTemplate {
        ctx,
        total: responses.len(),
        rows: responses.iter().map(ResponseRow::from).collect(),
    })
}

pub async fn detail(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let admin = require_admin(&session)?;
    let found = response::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    let ctx = PageContext::build(&session, &admin, "dashboard")?;
    render(ResponseDetailTemplate::new(ctx, &found))
}

pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let admin = require_admin(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    if response::delete(&pool, id).await? {
        log::info!("Admin '{}' deleted survey response {id}", admin.username);
        set_flash(&session, FlashLevel::Success, format!("Réponse n°{id} supprimée."));
    } else {
        set_flash(&session, FlashLevel::Error, "Réponse introuvable.");
    }
    Ok(to_dashboard())
}

pub async fn statistics(
    pool: web::Data<PgPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let admin = require_admin(&session)?;
    let ctx = PageContext::build(&session, &admin, "statistics")?;
    let responses = response::find_all(&pool).await?;
    let stats = Statistics::from_responses(&responses);
    let charts_json = script_json(&stats.charts)?;
    render(StatisticsTemplate { ctx, stats, charts_json })
}

/// CSV download of every response, newest first. Shared with the JSON API.
pub async fn export_csv(
    pool: web::Data<PgPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let admin = require_admin(&session)?;
    let responses = response::find_all(&pool).await?;
    if responses.is_empty() {
        return Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body(NOTHING_TO_EXPORT));
    }

    log::info!("Admin '{}' exported {} responses", admin.username, responses.len());
    let filename = response::csv_filename(Utc::now().date_naive());
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", format!("attachment; filename=\"{filename}\"")))
        .body(response::to_csv(&responses)))
}
