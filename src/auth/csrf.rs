use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const SESSION_KEY: &str = "csrf_token";

/// The session's CSRF token, created on first use.
pub fn get_or_create_token(session: &Session) -> String {
    if let Ok(Some(token)) = session.get::<String>(SESSION_KEY) {
        return token;
    }
    let token = generate_token();
    let _ = session.insert(SESSION_KEY, &token);
    token
}

/// Compare a submitted token with the one stored in the session.
pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    let stored = session
        .get::<String>(SESSION_KEY)
        .unwrap_or(None)
        .unwrap_or_default();
    if tokens_match(&stored, submitted) {
        Ok(())
    } else {
        log::warn!("Rejected request with invalid CSRF token");
        Err(AppError::Csrf)
    }
}

fn tokens_match(stored: &str, submitted: &str) -> bool {
    !stored.is_empty() && constant_time_eq(stored, submitted)
}

/// 32 random bytes, hex encoded.
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
