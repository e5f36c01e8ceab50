use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use super::session::current_admin;

pub const LOGIN_PATH: &str = "/admin/login";

/// Guards the admin HTML pages. Visitors without an admin session are sent
/// to the login page.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    if current_admin(&session).is_none() {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", LOGIN_PATH))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Same guard for the JSON API: a 401 body instead of a redirect.
pub async fn require_auth_json(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    if current_admin(&session).is_none() {
        let response =
            HttpResponse::Unauthorized().json(serde_json::json!({ "message": "Non autorisé" }));
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
