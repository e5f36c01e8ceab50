// Template context structures for Askama templates, split by page area.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{AdminIdentity, Flash, take_flash};
use crate::errors::AppError;

pub mod admin;
pub mod survey;

pub use admin::*;
pub use survey::*;

pub const APP_NAME: &str = "Sondage Repas";

/// Shared context of every admin page. Templates read `ctx.username`,
/// `ctx.flash` and `ctx.csrf_token`.
pub struct PageContext {
    pub username: String,
    pub flash: Option<Flash>,
    pub app_name: &'static str,
    pub csrf_token: String,
    pub active: &'static str,
}

impl PageContext {
    pub fn build(
        session: &Session,
        admin: &AdminIdentity,
        active: &'static str,
    ) -> Result<Self, AppError> {
        Ok(Self {
            username: admin.username.clone(),
            flash: take_flash(session),
            app_name: APP_NAME,
            csrf_token: csrf::get_or_create_token(session),
            active,
        })
    }
}

/// JSON for an inline `<script>` block. `<` is escaped so a stored
/// answer can never close the script element.
pub fn script_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::Template(askama::Error::Custom(Box::new(e))))?;
    Ok(json.replace('<', "\\u003c"))
}
