use std::fmt;
use std::future::Future;

use sqlx::PgPool;

use super::payload::SubmissionPayload;
use crate::models::response::{self, NewSurveyResponse};

/// Shown when a required answer or the privacy consent is missing.
pub const VALIDATION_MESSAGE: &str =
    "Veuillez répondre à toutes les questions obligatoires et accepter la politique de confidentialité.";

/// Fallback when the store gives no reason.
pub const GENERIC_FAILURE: &str = "Une erreur est survenue.";

pub const SUCCESS_MESSAGE: &str =
    "Merci pour votre participation ! Votre réponse a été enregistrée.";

/// Why the store refused a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRejected {
    pub reason: String,
}

impl SubmissionRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn generic() -> Self {
        Self::new(GENERIC_FAILURE)
    }
}

/// Where a completed form goes. Transport failures must come back as
/// `Err(SubmissionRejected)` like any explicit refusal.
pub trait SubmissionClient {
    fn submit_payload(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<i64, SubmissionRejected>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A required answer or the consent is missing. Nothing was sent.
    Validation,
    /// The store refused or could not be reached.
    Rejected(String),
    /// A submission for this form is already waiting on the store.
    InFlight,
}

impl SubmitError {
    /// The single inline message shown above the form.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation => VALIDATION_MESSAGE.to_string(),
            SubmitError::Rejected(reason) => {
                format!("Erreur lors de l'enregistrement de votre réponse: {reason}")
            }
            SubmitError::InFlight => "Envoi en cours...".to_string(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

/// Writes payloads straight into the `survey_responses` table.
#[derive(Clone)]
pub struct StoreSubmissionClient {
    pool: PgPool,
}

impl StoreSubmissionClient {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SubmissionClient for StoreSubmissionClient {
    async fn submit_payload(&self, payload: &SubmissionPayload) -> Result<i64, SubmissionRejected> {
        let record = NewSurveyResponse::try_from(payload).map_err(SubmissionRejected::new)?;
        response::create(&self.pool, &record).await.map_err(|e| {
            log::error!("Failed to store survey response: {e}");
            SubmissionRejected::generic()
        })
    }
}
