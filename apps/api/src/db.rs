use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the submissions table and its lookup indexes if they do not exist.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS salary_submissions (
            id               VARCHAR(64) PRIMARY KEY,
            user_id          VARCHAR(64),
            job_title        VARCHAR(255) NOT NULL,
            industry         VARCHAR(100) NOT NULL,
            years_experience INTEGER NOT NULL,
            salary           DOUBLE PRECISION NOT NULL,
            location         VARCHAR(255) NOT NULL,
            gender           VARCHAR(50),
            ethnicity        VARCHAR(100),
            education_level  VARCHAR(50),
            company_size     VARCHAR(50),
            company_name     VARCHAR(255),
            remote_status    VARCHAR(50),
            created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create salary_submissions")?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_salary_industry_experience \
         ON salary_submissions (LOWER(industry), years_experience)",
    )
    .execute(pool)
    .await
    .context("failed to create industry index")?;

    info!("Database schema ready");
    Ok(())
}
