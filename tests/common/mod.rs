//! Shared test infrastructure.
//!
//! # Database
//! - `setup_test_db()` gives each test its own PostgreSQL schema with the
//!   migrations applied. It returns `None` when neither `TEST_DATABASE_URL`
//!   nor `DATABASE_URL` is set, and the calling test returns early.
//! - `lazy_pool()` is a pool that never connects, for HTTP tests that must
//!   not touch the database.
//!
//! # HTTP
//! - `test_app!(pool)` builds the full service with a cookie session.
//! - `session_cookie` / `extract_csrf` carry the session between requests.

#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use rand::Rng;
use regex::Regex;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use sondage::db::MIGRATOR;
use sondage::survey::SubmissionPayload;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "password123";

// ============================================================================
// DATABASE SETUP
// ============================================================================

pub struct TestDb {
    pool: PgPool,
    schema: String,
    url: String,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Drop the schema. Tests that skip this only leave an unused schema behind.
    pub async fn cleanup(self) {
        self.pool.close().await;
        if let Ok(pool) = PgPoolOptions::new().max_connections(1).connect(&self.url).await {
            let _ = pool
                .execute(format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema).as_str())
                .await;
        }
    }
}

fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .filter(|u| !u.trim().is_empty())
}

/// Fresh schema with migrations applied, or `None` when no database is configured.
pub async fn setup_test_db() -> Option<TestDb> {
    let Some(url) = database_url() else {
        eprintln!("DATABASE_URL not set, skipping database test");
        return None;
    };

    let suffix: [u8; 6] = rand::rng().random();
    let schema = format!("test_{}", hex::encode(suffix));

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("connect to test database");
    admin
        .execute(format!("CREATE SCHEMA {schema}").as_str())
        .await
        .expect("create test schema");
    admin.close().await;

    let search_path = format!("SET search_path TO {schema}");
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let sql = search_path.clone();
            Box::pin(async move {
                conn.execute(sql.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("connect to test schema");

    MIGRATOR.run(&pool).await.expect("run migrations");

    Some(TestDb { pool, schema, url })
}

/// Pool that only fails if something actually queries it.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy("postgres://nobody@127.0.0.1:1/none")
        .expect("lazy pool")
}

// ============================================================================
// FIXTURES
// ============================================================================

/// A payload that passes every required-field check.
pub fn complete_payload() -> SubmissionPayload {
    SubmissionPayload {
        ville: "Cotonou".into(),
        situation_professionnelle: "Salarié(e)".into(),
        mange_exterieur_freq: "4-6 fois par semaine".into(),
        temps_preparation_repas: "30 minutes - 1 heure".into(),
        types_repas: vec!["Déjeuner".into(), "Dîner".into()],
        defis_alimentation: vec!["Manque de temps pour cuisiner".into()],
        satisfaction_acces_repas: Some(2),
        interet_solution_repas: "Oui".into(),
        aspects_importants: vec!["Prix abordable".into(), "Garantie d'hygiène".into()],
        budget_journalier_repas: "1500 - 2000 FCFA".into(),
        prix_max_repas: "750 - 1000 FCFA".into(),
        budget_mensuel_abo: "25 000 - 35 000 FCFA".into(),
        accepte_politique: true,
        ..SubmissionPayload::default()
    }
}

// ============================================================================
// HTTP HELPERS
// ============================================================================

/// Full application wired like `main`, minus static files.
#[macro_export]
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::generate(),
                    )
                    .cookie_secure(false)
                    .cookie_http_only(true)
                    .build(),
                )
                .app_data(actix_web::web::Data::new($pool))
                .app_data(actix_web::web::Data::new(sondage::survey::FormRegistry::new(
                    &sondage::survey::MEAL_SURVEY,
                )))
                .app_data(actix_web::web::Data::new(
                    sondage::auth::rate_limit::RateLimiter::default(),
                ))
                .configure(sondage::handlers::configure)
                .default_service(actix_web::web::to(sondage::handlers::not_found)),
        )
        .await
    };
}

/// The session cookie set by a response, if it set one.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .map(|c| c.into_owned())
}

pub fn extract_csrf(html: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .expect("page has a csrf token")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `GET path`, carrying the session cookie when there is one.
pub fn get(path: &str, cookie: Option<&Cookie<'static>>) -> test::TestRequest {
    let req = test::TestRequest::get().uri(path);
    match cookie {
        Some(c) => req.cookie(c.clone()),
        None => req,
    }
}

/// Body of an HTML page plus its CSRF token and the latest session cookie.
pub async fn read_page<B: MessageBody>(
    resp: ServiceResponse<B>,
    cookie: Option<Cookie<'static>>,
) -> (String, Cookie<'static>, String) {
    let cookie = session_cookie(&resp).or(cookie).expect("session cookie");
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body");
    (extract_csrf(&body), cookie, body)
}
