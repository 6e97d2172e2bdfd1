//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{User, Username};
use crate::ports::UserRepository;

use super::{column_error, violated_constraint};

const USERS_USERNAME_KEY: &str = "users_username_key";

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, password_hash, is_active, date_joined, last_login
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.password_hash())
        .bind(user.is_active())
        .bind(user.date_joined().as_datetime())
        .bind(user.last_login().map(|at| *at.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violated_constraint(&e) == Some(USERS_USERNAME_KEY) {
                return DomainError::new(
                    ErrorCode::UsernameTaken,
                    format!("Username already taken: {}", user.username()),
                )
                .with_detail("username", user.username().as_str());
            }
            DomainError::database("Failed to insert user", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, is_active, date_joined, last_login
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, is_active, date_joined, last_login
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch user by username", e))?;

        row.map(row_to_user).transpose()
    }

    async fn record_login(&self, id: &UserId, at: Timestamp) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to record login", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        // student_profiles rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_user(row: sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(column_error("id"))?;
    let username: String = row.try_get("username").map_err(column_error("username"))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(column_error("password_hash"))?;
    let is_active: bool = row.try_get("is_active").map_err(column_error("is_active"))?;
    let date_joined: chrono::DateTime<chrono::Utc> = row
        .try_get("date_joined")
        .map_err(column_error("date_joined"))?;
    let last_login: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("last_login")
        .map_err(column_error("last_login"))?;

    let username = Username::parse(&username).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored username is invalid: {}", e),
        )
    })?;

    Ok(User::reconstitute(
        UserId::from_uuid(id),
        username,
        password_hash,
        is_active,
        Timestamp::from_datetime(date_joined),
        last_login.map(Timestamp::from_datetime),
    ))
}
