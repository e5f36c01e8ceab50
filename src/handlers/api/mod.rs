pub mod responses;
pub mod session;
pub mod survey;

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::{Next, from_fn},
};

use crate::auth::middleware::require_auth_json;

/// CSRF guard for the JSON endpoints.
///
/// POST requests must carry `Content-Type: application/json`. A plain
/// cross-site form post cannot set it, so no token is needed here.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if req.method() == actix_web::http::Method::POST {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "message": "Content-Type must be application/json"
            });
            let response = HttpResponse::UnsupportedMediaType().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Malformed JSON bodies get the same `{message}` shape as every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "message": format!("Requête invalide: {err}")
        }));
        InternalError::from_response(err, response).into()
    })
}

/// Mount the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .wrap(from_fn(require_json_content_type))
            .route("/submit-survey", web::post().to(survey::submit))
            .route("/login", web::post().to(session::login))
            .route("/logout", web::post().to(session::logout))
            .route("/check-session", web::get().to(session::check))
            .service(
                web::resource("/responses")
                    .wrap(from_fn(require_auth_json))
                    .route(web::get().to(responses::list)),
            )
            .service(
                web::resource("/responses/{id}")
                    .wrap(from_fn(require_auth_json))
                    .route(web::get().to(responses::detail)),
            )
            .service(
                web::resource("/export-csv")
                    .wrap(from_fn(require_auth_json))
                    .route(web::get().to(responses::export_csv)),
            ),
    );
}
