//!
//! # Admin user management
//!
//! Every handler here resolves the caller and requires the admin role before
//! touching the user repository.

use actix_web::{delete, get, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{guard, hash_password, identity, AuthenticatedSubject},
    error::AppError,
    models::{UserOut, UserUpdate},
    repo::user as user_repo,
};

#[get("")]
pub async fn list_users(
    pool: web::Data<PgPool>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    let caller = identity::resolve(&pool, subject.0).await?;
    guard::require_admin(&caller)?;

    let users = user_repo::list(&pool).await?;
    let users: Vec<UserOut> = users.into_iter().map(UserOut::from).collect();

    Ok(HttpResponse::Ok().json(users))
}

#[get("/{id}")]
pub async fn get_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    let caller = identity::resolve(&pool, subject.0).await?;
    guard::require_admin(&caller)?;

    let user = user_repo::find(&pool, user_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(UserOut::from(user)))
}

/// Updates email and/or password. A supplied password is re-hashed through
/// the credential store before persisting.
#[put("/{id}")]
pub async fn update_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    update: web::Json<UserUpdate>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    update.validate()?;

    let caller = identity::resolve(&pool, subject.0).await?;
    guard::require_admin(&caller)?;

    let mut user = user_repo::find(&pool, user_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let update = update.into_inner();
    let hashed_password = match update.password {
        Some(password) => Some(hash_password(&password)?),
        None => None,
    };
    user.apply_update(update.email, hashed_password);

    let updated = user_repo::update(&pool, &user).await?;
    Ok(HttpResponse::Ok().json(UserOut::from(updated)))
}

/// Deletes a user; their tasks cascade away with the row.
#[delete("/{id}")]
pub async fn delete_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    let caller = identity::resolve(&pool, subject.0).await?;
    guard::require_admin(&caller)?;

    if user_repo::delete(&pool, user_id.into_inner()).await? == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
