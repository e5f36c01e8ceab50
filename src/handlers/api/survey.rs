use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::models::response::{self, NewSurveyResponse};
use crate::survey::SubmissionPayload;

/// `POST /api/submit-survey`: store a completed form sent as JSON.
pub async fn submit(
    pool: web::Data<PgPool>,
    body: web::Json<SubmissionPayload>,
) -> HttpResponse {
    let record = match NewSurveyResponse::try_from(&*body) {
        Ok(record) => record,
        Err(message) => return HttpResponse::BadRequest().json(json!({ "message": message })),
    };

    match response::create(&pool, &record).await {
        Ok(id) => HttpResponse::Created().json(json!({
            "message": "Réponse enregistrée avec succès!",
            "responseId": id,
        })),
        Err(e) => {
            log::error!("Survey submission failed: {e}");
            HttpResponse::InternalServerError().json(json!({
                "message": "Erreur serveur interne.",
                "details": e.to_string(),
            }))
        }
    }
}
