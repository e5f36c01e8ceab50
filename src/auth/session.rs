use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::admin::Admin;

const ADMIN_ID: &str = "admin_id";
const ADMIN_USERNAME: &str = "admin_username";
const FLASH: &str = "flash";
const FORM_ID: &str = "form_id";

/// The signed-in administrator, taken from the session cookie and handed
/// explicitly to every admin operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminIdentity {
    pub id: i64,
    pub username: String,
}

pub fn current_admin(session: &Session) -> Option<AdminIdentity> {
    let id = session.get::<i64>(ADMIN_ID).unwrap_or(None)?;
    let username = session.get::<String>(ADMIN_USERNAME).unwrap_or(None)?;
    Some(AdminIdentity { id, username })
}

pub fn require_admin(session: &Session) -> Result<AdminIdentity, AppError> {
    current_admin(session).ok_or(AppError::Unauthorized)
}

pub fn sign_in(session: &Session, admin: &Admin) -> Result<AdminIdentity, AppError> {
    session.renew();
    session
        .insert(ADMIN_ID, admin.id)
        .and_then(|_| session.insert(ADMIN_USERNAME, &admin.username))
        .map_err(|e| AppError::Session(e.to_string()))?;
    Ok(AdminIdentity { id: admin.id, username: admin.username.clone() })
}

/// Drops everything, the in-progress survey form id included.
pub fn sign_out(session: &Session) {
    session.purge();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

/// One-shot message shown at the top of the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn is_error(&self) -> bool {
        self.level == FlashLevel::Error
    }
}

pub fn set_flash(session: &Session, level: FlashLevel, message: impl Into<String>) {
    let flash = Flash { level, message: message.into() };
    if let Err(e) = session.insert(FLASH, &flash) {
        log::warn!("Could not store flash message: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<Flash> {
    let flash = session.get::<Flash>(FLASH).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH);
    }
    flash
}

/// Key of this visitor's in-progress form, created on first use.
pub fn form_id(session: &Session) -> Result<String, AppError> {
    if let Some(id) = session.get::<String>(FORM_ID).unwrap_or(None) {
        return Ok(id);
    }
    let id = crate::auth::csrf::generate_token();
    session
        .insert(FORM_ID, &id)
        .map_err(|e| AppError::Session(e.to_string()))?;
    Ok(id)
}
