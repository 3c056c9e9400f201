//!
//! # Schema and role seeding
//!
//! Registration fails hard when the default role is missing, so seeding is
//! an explicit operational step: the `seed` binary applies the schema,
//! inserts the `admin` and `user` roles, and creates an initial admin
//! account. Everything here is idempotent and safe to re-run.

use sqlx::{Executor, PgPool};
use uuid::Uuid;

use crate::auth::hash_password;
use crate::error::AppError;
use crate::repo::user as user_repo;

const SCHEMA_SQL: &str = include_str!("../migrations/0001_init.sql");

const ROLE_NAMES: [&str; 2] = ["admin", "user"];

pub async fn apply_schema(pool: &PgPool) -> Result<(), AppError> {
    pool.execute(SCHEMA_SQL).await?;
    Ok(())
}

pub async fn seed_roles(pool: &PgPool) -> Result<(), AppError> {
    for name in ROLE_NAMES {
        sqlx::query("INSERT INTO roles (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(Uuid::new_v4())
            .bind(name)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Creates the initial admin account if absent. Returns whether a user was
/// created.
pub async fn seed_admin(pool: &PgPool, email: &str, password: &str) -> Result<bool, AppError> {
    if user_repo::find_by_email(pool, email).await?.is_some() {
        return Ok(false);
    }

    let role: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM roles WHERE LOWER(name) = 'admin'")
        .fetch_optional(pool)
        .await?;
    let role_id = role
        .map(|(id,)| id)
        .ok_or_else(|| AppError::Internal("admin role missing; seed roles first".into()))?;

    let hashed_password = hash_password(password)?;
    user_repo::insert(pool, email, &hashed_password, role_id).await?;
    Ok(true)
}

/// Full seed pass: schema, roles, admin account.
pub async fn run(pool: &PgPool, admin_email: &str, admin_password: &str) -> Result<(), AppError> {
    apply_schema(pool).await?;
    seed_roles(pool).await?;

    if seed_admin(pool, admin_email, admin_password).await? {
        log::info!("created admin user {}", admin_email);
    } else {
        log::info!("admin user {} already present", admin_email);
    }

    Ok(())
}
