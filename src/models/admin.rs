use sqlx::PgPool;

use crate::auth::password;
use crate::errors::AppError;

/// Admin account, including the password hash. Never handed to templates.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Admin>, AppError> {
    let admin = sqlx::query_as::<_, Admin>(
        "SELECT id, username, password_hash FROM admins WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(admin)
}

/// Create the configured admin account if it does not exist yet.
/// An existing account keeps its password. Returns true when a row was created.
pub async fn ensure_admin_user(
    pool: &PgPool,
    username: &str,
    plain_password: &str,
) -> Result<bool, AppError> {
    if find_by_username(pool, username).await?.is_some() {
        log::info!("Admin user '{username}' already exists, skipping seed");
        return Ok(false);
    }

    let hash = password::hash_password(plain_password)?;
    let inserted = sqlx::query(
        "INSERT INTO admins (username, password_hash) VALUES ($1, $2) ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(&hash)
    .execute(pool)
    .await?;

    let created = inserted.rows_affected() > 0;
    if created {
        log::info!("Created admin user '{username}'");
    }
    Ok(created)
}

/// Look up `username` and check `plain_password` against its hash.
/// Unknown users and wrong passwords are both `None`.
pub async fn authenticate(
    pool: &PgPool,
    username: &str,
    plain_password: &str,
) -> Result<Option<Admin>, AppError> {
    let Some(admin) = find_by_username(pool, username).await? else {
        return Ok(None);
    };
    if password::verify_password(plain_password, &admin.password_hash)? {
        Ok(Some(admin))
    } else {
        Ok(None)
    }
}
