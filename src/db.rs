use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::errors::StartupError;
use crate::models::admin;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, StartupError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(StartupError::Connect)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), StartupError> {
    MIGRATOR.run(pool).await.map_err(StartupError::Migrate)?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Connect, migrate and seed the configured admin account.
pub async fn setup(config: &Config) -> Result<PgPool, StartupError> {
    let pool = init_pool(&config.database_url, config.db_max_connections).await?;
    run_migrations(&pool).await?;
    admin::ensure_admin_user(&pool, &config.admin_username, &config.admin_password)
        .await
        .map_err(StartupError::Seed)?;
    Ok(pool)
}
