//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - User accounts
//! - `PostgresStudentProfileRepository` - Student profiles
//!
//! Schema lives in `migrations/` and is applied with [`run_migrations`].

mod student_profile_repository;
mod user_repository;

pub use student_profile_repository::PostgresStudentProfileRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Open a connection pool sized and timed per configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}

/// Apply pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Name of the unique or foreign-key constraint an error violated, if any.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err)
            if matches!(db_err.code().as_deref(), Some("23505") | Some("23503")) =>
        {
            db_err.constraint()
        }
        _ => None,
    }
}

pub(crate) fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(&format!("Failed to get {}", column), e)
}
