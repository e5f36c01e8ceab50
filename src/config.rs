use std::{env, fmt::Display, str::FromStr};

use actix_web::cookie::Key;

use crate::errors::StartupError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "password123";
const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub session_key: Key,
    pub cookie_secure: bool,
    pub admin_username: String,
    pub admin_password: String,
    pub db_max_connections: u32,
}

impl Config {
    /// Load `.env` (if any) then read the process environment.
    pub fn from_env() -> Result<Self, StartupError> {
        if let Err(e) = dotenvy::dotenv() {
            log::info!("No .env file loaded: {e}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, so tests do not touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StartupError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| StartupError::Config("DATABASE_URL is not set".to_string()))?;
        if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
            return Err(StartupError::Config(
                "DATABASE_URL must start with postgres:// or postgresql://".to_string(),
            ));
        }

        let session_key = match lookup("SESSION_KEY") {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        };

        let admin_username = try_load(&lookup, "ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME)?;
        let admin_password: String = try_load(&lookup, "ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD)?;
        if admin_password == DEFAULT_ADMIN_PASSWORD {
            log::warn!("ADMIN_PASSWORD not set, the default admin password is in use");
        }

        Ok(Self {
            database_url,
            bind_addr: try_load(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?,
            session_key,
            cookie_secure: try_load(&lookup, "COOKIE_SECURE", "false")?,
            admin_username,
            admin_password,
            db_max_connections: try_load(&lookup, "DB_MAX_CONNECTIONS", "8")?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, StartupError>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            log::info!("{key} not set, using default");
            default.to_string()
        })
        .parse()
        .map_err(|e| StartupError::Config(format!("Invalid {key} value: {e}")))
}
