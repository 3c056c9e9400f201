use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A user row. The password hash never leaves the server; API responses use
/// [`UserOut`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub role_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserOut {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Admin update of a user: only supplied fields change. A supplied password
/// is re-hashed by the credential store before it reaches the repository.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
}

impl User {
    /// Merges an already-hashed update field-by-field.
    pub fn apply_update(&mut self, email: Option<String>, hashed_password: Option<String>) {
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(hashed_password) = hashed_password {
            self.hashed_password = hashed_password;
        }
    }
}
