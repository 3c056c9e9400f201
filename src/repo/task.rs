//!
//! # Task repository
//!
//! CRUD persistence for tasks. The repository performs no authorization;
//! routes run the guard before any call that touches a specific row.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::task::{Task, TaskListQuery};
use crate::repo::Page;

const TASK_COLUMNS: &str =
    "id, title, description, status, priority, owner_id, created_at, updated_at";

/// Persists a task built by [`Task::new`].
pub async fn create(pool: &PgPool, task: &Task) -> Result<Task, AppError> {
    let created = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, description, status, priority, owner_id, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id, title, description, status, priority, owner_id, created_at, updated_at",
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(&task.status)
    .bind(&task.priority)
    .bind(task.owner_id)
    .bind(task.created_at)
    .bind(task.updated_at)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Tasks owned by `owner_id`, with optional status/priority filters.
pub async fn list_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
    query: &TaskListQuery,
    page: &Page,
) -> Result<Vec<Task>, AppError> {
    list(pool, Some(owner_id), query, page).await
}

/// All tasks regardless of owner. Admin listings only; the route guards.
pub async fn list_all(
    pool: &PgPool,
    query: &TaskListQuery,
    page: &Page,
) -> Result<Vec<Task>, AppError> {
    list(pool, None, query, page).await
}

// Conditions are appended dynamically with positional parameters; every
// value still goes through a bind, never into the SQL string.
async fn list(
    pool: &PgPool,
    owner_id: Option<Uuid>,
    query: &TaskListQuery,
    page: &Page,
) -> Result<Vec<Task>, AppError> {
    let mut sql = format!("SELECT {} FROM tasks", TASK_COLUMNS);
    let mut conditions: Vec<String> = Vec::new();
    let mut param_count = 1;

    if owner_id.is_some() {
        conditions.push(format!("owner_id = ${}", param_count));
        param_count += 1;
    }
    if query.status.is_some() {
        conditions.push(format!("status = ${}", param_count));
        param_count += 1;
    }
    if query.priority.is_some() {
        conditions.push(format!("priority = ${}", param_count));
        param_count += 1;
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    // Stable insertion order; the id tiebreak keeps pagination deterministic
    // when created_at collides.
    sql.push_str(&format!(
        " ORDER BY created_at ASC, id ASC LIMIT ${} OFFSET ${}",
        param_count,
        param_count + 1
    ));

    let mut query_builder = sqlx::query_as::<_, Task>(&sql);

    if let Some(owner_id) = owner_id {
        query_builder = query_builder.bind(owner_id);
    }
    if let Some(status) = &query.status {
        query_builder = query_builder.bind(status);
    }
    if let Some(priority) = &query.priority {
        query_builder = query_builder.bind(priority);
    }
    query_builder = query_builder.bind(page.limit()).bind(page.offset());

    let tasks = query_builder.fetch_all(pool).await?;
    Ok(tasks)
}

pub async fn find(pool: &PgPool, task_id: Uuid) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1",
        TASK_COLUMNS
    ))
    .bind(task_id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Writes back a task whose fields were merged via [`Task::apply_patch`].
/// Ownership and `created_at` are not part of the column list.
pub async fn update(pool: &PgPool, task: &Task) -> Result<Task, AppError> {
    let updated = sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = $1, description = $2, status = $3, priority = $4, updated_at = $5
         WHERE id = $6
         RETURNING id, title, description, status, priority, owner_id, created_at, updated_at",
    )
    .bind(&task.title)
    .bind(&task.description)
    .bind(&task.status)
    .bind(&task.priority)
    .bind(task.updated_at)
    .bind(task.id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Returns the number of rows removed; 0 means the task was already gone.
pub async fn delete(pool: &PgPool, task_id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
