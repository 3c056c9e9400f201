use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{guard, identity, AuthenticatedSubject},
    error::AppError,
    models::{Task, TaskInput, TaskListQuery, TaskPatch},
    repo::{task as task_repo, Page},
};

/// Lists tasks: every task for admins, the caller's own otherwise.
///
/// Supports `status` and `priority` equality filters plus `page`/`limit`
/// pagination (limit clamped to [1,100]).
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query: web::Query<TaskListQuery>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    let user = identity::resolve(&pool, subject.0).await?;
    let page = Page::new(query.page, query.limit);

    let tasks = if guard::is_admin(&user) {
        task_repo::list_all(&pool, &query, &page).await?
    } else {
        task_repo::list_for_owner(&pool, user.id, &query, &page).await?
    };

    Ok(HttpResponse::Ok().json(tasks))
}

/// The caller's own tasks, regardless of role.
#[get("/me")]
pub async fn my_tasks(
    pool: web::Data<PgPool>,
    query: web::Query<TaskListQuery>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    let user = identity::resolve(&pool, subject.0).await?;
    let page = Page::new(query.page, query.limit);

    let tasks = task_repo::list_for_owner(&pool, user.id, &query, &page).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let user = identity::resolve(&pool, subject.0).await?;
    let task = Task::new(task_data.into_inner(), user.id);
    let created = task_repo::create(&pool, &task).await?;

    Ok(HttpResponse::Created().json(created))
}

/// Fetches a single task. Owner or admin only: absent ids answer 404,
/// foreign ids 403.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    let user = identity::resolve(&pool, subject.0).await?;

    let task = task_repo::find(&pool, task_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    guard::require_owner_or_admin(&user, task.owner_id)?;

    Ok(HttpResponse::Ok().json(task))
}

/// Partial update: only the supplied fields change, `updated_at` refreshes.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    patch: web::Json<TaskPatch>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    patch.validate()?;

    let user = identity::resolve(&pool, subject.0).await?;

    let mut task = task_repo::find(&pool, task_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    guard::require_owner_or_admin(&user, task.owner_id)?;

    task.apply_patch(patch.into_inner());
    let updated = task_repo::update(&pool, &task).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Deletes a task. Repeating the delete answers 404.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    let user = identity::resolve(&pool, subject.0).await?;
    let task_id = task_id.into_inner();

    let task = task_repo::find(&pool, task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    guard::require_owner_or_admin(&user, task.owner_id)?;

    if task_repo::delete(&pool, task_id).await? == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
