use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::{self, FlashLevel, set_flash};
use crate::errors::{AppError, render};
use crate::survey::submit::SUCCESS_MESSAGE;
use crate::survey::{FormRegistry, StoreSubmissionClient};
use crate::templates_structs::SurveyTemplate;

use super::CsrfOnly;

const INCOMPLETE_SECTION: &str =
    "Veuillez répondre à toutes les questions obligatoires de cette section.";

#[derive(Deserialize)]
pub struct AnswerForm {
    pub csrf_token: String,
    pub field: String,
    #[serde(default)]
    pub value: String,
    pub other: Option<String>,
}

#[derive(Deserialize)]
pub struct SectionForm {
    pub csrf_token: String,
    /// A section ordinal, `next` or `previous`.
    pub target: String,
}

fn back_to_form() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/"))
        .finish()
}

pub async fn show(
    registry: web::Data<FormRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let form_id = session::form_id(&session)?;
    let flash = session::take_flash(&session);
    let csrf_token = csrf::get_or_create_token(&session);
    let tmpl = registry.with_form(&form_id, |form| SurveyTemplate::build(form, flash, csrf_token));
    render(tmpl)
}

pub async fn answer(
    registry: web::Data<FormRegistry>,
    session: Session,
    form: web::Form<AnswerForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form_id = session::form_id(&session)?;
    registry.with_form(&form_id, |state| {
        state.set_answer(&form.field, &form.value, form.other.as_deref());
    });
    Ok(back_to_form())
}

pub async fn section(
    registry: web::Data<FormRegistry>,
    session: Session,
    form: web::Form<SectionForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form_id = session::form_id(&session)?;
    let moved = registry.with_form(&form_id, |state| match form.target.as_str() {
        "next" => state.next_section(),
        "previous" => {
            state.previous_section();
            true
        }
        other => {
            if let Ok(n) = other.parse() {
                state.go_to_section(n);
            }
            true
        }
    });
    if !moved {
        set_flash(&session, FlashLevel::Error, INCOMPLETE_SECTION);
    }
    Ok(back_to_form())
}

pub async fn submit(
    pool: web::Data<PgPool>,
    registry: web::Data<FormRegistry>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form_id = session::form_id(&session)?;

    let mut attempt = match registry.check_out(&form_id) {
        Ok(attempt) => attempt,
        Err(e) => {
            set_flash(&session, FlashLevel::Error, e.user_message());
            return Ok(back_to_form());
        }
    };

    // The registry lock is not held across the await. Dropping `attempt`
    // releases the form even if this future is cancelled.
    let client = StoreSubmissionClient::new(pool.get_ref().clone());
    let result = attempt.form_mut().submit(&client).await;
    if result.is_ok() {
        attempt.stored();
    } else {
        drop(attempt);
    }

    match result {
        Ok(id) => {
            log::info!("Survey response {id} submitted");
            set_flash(&session, FlashLevel::Success, SUCCESS_MESSAGE);
        }
        Err(e) => set_flash(&session, FlashLevel::Error, e.user_message()),
    }
    Ok(back_to_form())
}
