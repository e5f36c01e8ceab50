//! End-to-end tests for the JSON API and the admin pages. These need
//! PostgreSQL and skip without a database URL, except the guard checks
//! which never reach the store.

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::*;
use sondage::handlers::admin_handlers::NOTHING_TO_EXPORT;
use sondage::models::{admin, response};
use sondage::models::response::NewSurveyResponse;
use sondage::survey::submit::SUCCESS_MESSAGE;

async fn seed_response(pool: &sqlx::PgPool, ville: &str) -> i64 {
    let mut payload = complete_payload();
    payload.ville = ville.to_string();
    let record = NewSurveyResponse::try_from(&payload).expect("complete payload");
    response::create(pool, &record).await.expect("seed response")
}

// ============================================================================
// GUARDS (no database)
// ============================================================================

#[actix_rt::test]
async fn test_admin_pages_redirect_to_login_when_signed_out() {
    let app = test_app!(lazy_pool());
    for path in [
        "/admin",
        "/admin/dashboard",
        "/admin/statistics",
        "/admin/export.csv",
        "/admin/responses/1",
    ] {
        let resp = test::call_service(&app, get(path, None).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&resp), "/admin/login", "{path}");
    }
}

#[actix_rt::test]
async fn test_api_admin_endpoints_are_401_when_signed_out() {
    let app = test_app!(lazy_pool());
    for path in ["/api/responses", "/api/responses/1", "/api/export-csv"] {
        let resp = test::call_service(&app, get(path, None).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{path}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Non autorisé");
    }
}

#[actix_rt::test]
async fn test_check_session_without_login_is_401() {
    let app = test_app!(lazy_pool());
    let resp = test::call_service(&app, get("/api/check-session", None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Not authenticated");
}

#[actix_rt::test]
async fn test_api_post_requires_json_content_type() {
    let app = test_app!(lazy_pool());
    let req = test::TestRequest::post()
        .uri("/api/submit-survey")
        .insert_header(("content-type", "text/plain"))
        .set_payload("ville=Cotonou")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[actix_rt::test]
async fn test_api_submit_with_missing_fields_is_400() {
    let app = test_app!(lazy_pool());
    let req = test::TestRequest::post()
        .uri("/api/submit-survey")
        .set_json(json!({ "ville": "Cotonou" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Champs obligatoires manquants.");
}

#[actix_rt::test]
async fn test_api_login_requires_both_fields() {
    let app = test_app!(lazy_pool());
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Username and password are required");
}

// ============================================================================
// JSON API (database)
// ============================================================================

#[actix_rt::test]
async fn test_api_submit_stores_the_response() {
    let Some(db) = setup_test_db().await else { return };
    let app = test_app!(db.pool().clone());

    let req = test::TestRequest::post()
        .uri("/api/submit-survey")
        .set_json(complete_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Réponse enregistrée avec succès!");

    let id = body["responseId"].as_i64().expect("responseId");
    let stored = response::find_by_id(db.pool(), id).await.expect("query").expect("stored");
    assert_eq!(stored.ville, "Cotonou");

    db.cleanup().await;
}

#[actix_rt::test]
async fn test_api_login_then_list_detail_and_export() {
    let Some(db) = setup_test_db().await else { return };
    admin::ensure_admin_user(db.pool(), ADMIN_USER, ADMIN_PASS).await.expect("seed admin");
    let app = test_app!(db.pool().clone());

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": ADMIN_USER, "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": ADMIN_USER, "password": ADMIN_PASS }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).expect("login sets the session cookie");

    let req = get("/api/check-session", Some(&cookie)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["admin"]["username"], ADMIN_USER);
    assert_eq!(body["admin"]["isLoggedIn"], true);

    // Nothing stored yet
    let resp = test::call_service(&app, get("/api/export-csv", Some(&cookie)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(resp).await;
    assert_eq!(std::str::from_utf8(&body).expect("utf-8"), NOTHING_TO_EXPORT);

    let older = seed_response(db.pool(), "Cotonou").await;
    let newer = seed_response(db.pool(), "Parakou").await;

    let resp = test::call_service(&app, get("/api/responses", Some(&cookie)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let ids: Vec<i64> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![newer, older]);
    assert!(body[0]["typesRepas"].is_array());

    let req = get(&format!("/api/responses/{older}"), Some(&cookie)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ville"], "Cotonou");

    let req = get("/api/responses/abc", Some(&cookie)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ID de réponse invalide");

    let req = get("/api/responses/999999", Some(&cookie)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Réponse introuvable");

    let resp = test::call_service(&app, get("/api/export-csv", Some(&cookie)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("attachment; filename=\"sondage_reponses_"));
    let body = test::read_body(resp).await;
    let csv = std::str::from_utf8(&body).expect("utf-8");
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Parakou"));

    let req = test::TestRequest::post()
        .uri("/api/logout")
        .cookie(cookie.clone())
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).unwrap_or(cookie);
    let req = get("/api/check-session", Some(&cookie)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    db.cleanup().await;
}

// ============================================================================
// HTML FLOW (database)
// ============================================================================

#[actix_rt::test]
async fn test_html_survey_submit_stores_row_and_shows_thanks() {
    let Some(db) = setup_test_db().await else { return };
    let app = test_app!(db.pool().clone());

    let resp = test::call_service(&app, get("/", None).to_request()).await;
    let (csrf, mut cookie, _) = read_page(resp, None).await;

    let answers = [
        ("ville", "Cotonou"),
        ("situationProfessionnelle", "Salarié(e)"),
        ("mangeExterieurFreq", "4-6 fois par semaine"),
        ("tempsPreparationRepas", "30 minutes - 1 heure"),
        ("typesRepas", "Déjeuner"),
        ("defisAlimentation", "Manque de temps pour cuisiner"),
        ("satisfactionAccesRepas", "2"),
        ("interetSolutionRepas", "Oui"),
        ("aspectsImportants", "Prix abordable"),
        ("budgetJournalierRepas", "1500 - 2000 FCFA"),
        ("prixMaxRepas", "750 - 1000 FCFA"),
        ("budgetMensuelAbo", "25 000 - 35 000 FCFA"),
        ("acceptePolitique", "true"),
    ];
    for (field, value) in answers {
        let req = test::TestRequest::post()
            .uri("/survey/answer")
            .cookie(cookie.clone())
            .set_form([("csrf_token", csrf.as_str()), ("field", field), ("value", value)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{field}");
        cookie = session_cookie(&resp).unwrap_or(cookie);
    }

    let req = test::TestRequest::post()
        .uri("/survey/submit")
        .cookie(cookie.clone())
        .set_form([("csrf_token", csrf.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&resp).unwrap_or(cookie);

    let resp = test::call_service(&app, get("/", Some(&cookie)).to_request()).await;
    let (_, _, body) = read_page(resp, Some(cookie)).await;
    assert!(body.contains(SUCCESS_MESSAGE));
    assert!(body.contains("Section 1 / 6"));
    assert!(body.contains("0% complété"));

    let stored = response::find_all(db.pool()).await.expect("find_all");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].types_repas, vec!["Déjeuner".to_string()]);

    db.cleanup().await;
}

#[actix_rt::test]
async fn test_html_admin_login_dashboard_and_delete() {
    let Some(db) = setup_test_db().await else { return };
    admin::ensure_admin_user(db.pool(), ADMIN_USER, ADMIN_PASS).await.expect("seed admin");
    let id = seed_response(db.pool(), "Abomey-Calavi").await;
    let app = test_app!(db.pool().clone());

    let resp = test::call_service(&app, get("/admin/login", None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let (csrf, cookie, _) = read_page(resp, None).await;

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .cookie(cookie.clone())
        .set_form([
            ("csrf_token", csrf.as_str()),
            ("username", ADMIN_USER),
            ("password", ADMIN_PASS),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/dashboard");
    let cookie = session_cookie(&resp).unwrap_or(cookie);

    let resp = test::call_service(&app, get("/admin/dashboard", Some(&cookie)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let (csrf, cookie, body) = read_page(resp, Some(cookie)).await;
    assert!(body.contains("Abomey-Calavi"));
    assert!(body.contains(&format!("/admin/responses/{id}/delete")));

    let req = get(&format!("/admin/responses/{id}"), Some(&cookie)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, get("/admin/statistics", Some(&cookie)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/responses/{id}/delete"))
        .cookie(cookie.clone())
        .set_form([("csrf_token", csrf.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&resp).unwrap_or(cookie);

    let resp = test::call_service(&app, get("/admin/dashboard", Some(&cookie)).to_request()).await;
    let (_, _, body) = read_page(resp, Some(cookie)).await;
    assert!(body.contains(&format!("Réponse n°{id} supprimée.")));
    assert!(body.contains("Aucune réponse pour le moment."));
    assert_eq!(response::count(db.pool()).await.expect("count"), 0);

    db.cleanup().await;
}
