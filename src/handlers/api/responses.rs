use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::handlers::admin_handlers;
use crate::models::response;

/// All responses, newest first, list fields as arrays.
pub async fn list(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let responses = response::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(responses))
}

pub async fn detail(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let Ok(id) = path.parse::<i64>() else {
        return Ok(HttpResponse::BadRequest().json(json!({ "message": "ID de réponse invalide" })));
    };
    match response::find_by_id(&pool, id).await? {
        Some(found) => Ok(HttpResponse::Ok().json(found)),
        None => Ok(HttpResponse::NotFound().json(json!({ "message": "Réponse introuvable" }))),
    }
}

pub async fn export_csv(
    pool: web::Data<PgPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    admin_handlers::export_csv(pool, session).await
}
