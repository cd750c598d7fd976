use crate::error::DbError;
use dotenvy::dotenv;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// This function reads the `DATABASE_URL` from the environment (a `.env` file is
/// loaded first when present), creates a connection pool, and returns it. The
/// pool is shared across the whole application.
pub async fn connect() -> Result<PgPool, DbError> {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_e| DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    tracing::debug!("Database connection pool established.");
    Ok(pool)
}

/// Applies the embedded migrations so the `life` table exists.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
