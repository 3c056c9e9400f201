//!
//! # User repository
//!
//! Persistence for user rows and the role lookups around them. No
//! authorization happens here; the `/users` routes require admin first.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::user::User;

const USER_COLUMNS: &str = "id, email, hashed_password, role_id, created_at";

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = $1",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY created_at ASC, id ASC",
        USER_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn insert(
    pool: &PgPool,
    email: &str,
    hashed_password: &str,
    role_id: Uuid,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, hashed_password, role_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id, email, hashed_password, role_id, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(hashed_password)
    .bind(role_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Writes back a user whose fields were merged via [`User::apply_update`].
pub async fn update(pool: &PgPool, user: &User) -> Result<User, AppError> {
    let updated = sqlx::query_as::<_, User>(
        "UPDATE users SET email = $1, hashed_password = $2
         WHERE id = $3
         RETURNING id, email, hashed_password, role_id, created_at",
    )
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Returns the number of rows removed. Tasks owned by the user go with it
/// through the `ON DELETE CASCADE` on `tasks.owner_id`.
pub async fn delete(pool: &PgPool, user_id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// The role new registrations receive. Roles are seeded explicitly; a
/// missing `user` role is an operational misconfiguration and fails hard
/// rather than being created on the fly.
pub async fn default_role_id(pool: &PgPool) -> Result<Uuid, AppError> {
    let role: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM roles WHERE LOWER(name) = 'user'")
            .fetch_optional(pool)
            .await?;

    role.map(|(id,)| id).ok_or_else(|| {
        AppError::Internal("default role 'user' is missing; run the seed binary".into())
    })
}
