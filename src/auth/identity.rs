use crate::error::AppError;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// The resolved caller: user row plus its role name, loaded in one query.
///
/// The role arrives eagerly via a `LEFT JOIN` so the authorization guard
/// never needs a second lookup. `role` is `None` for users without one,
/// which simply means no elevated privilege.
#[derive(Debug, Clone, FromRow)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Option<String>,
}

/// Loads the user behind a verified token subject.
///
/// A valid token whose user row has since been deleted resolves to 401, not
/// 404: the caller is no longer a known identity.
pub async fn resolve(pool: &PgPool, subject: Uuid) -> Result<CurrentUser, AppError> {
    let user = sqlx::query_as::<_, CurrentUser>(
        "SELECT u.id, u.email, r.name AS role
         FROM users u
         LEFT JOIN roles r ON r.id = u.role_id
         WHERE u.id = $1",
    )
    .bind(subject)
    .fetch_optional(pool)
    .await?;

    user.ok_or_else(|| AppError::Unauthorized("User not found".into()))
}
