use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_STATUS: &str = "pending";
pub const DEFAULT_PRIORITY: &str = "medium";

/// A task as stored in the database and returned by the API.
///
/// `status` and `priority` are free-form strings with defaults; `owner_id`
/// is set at creation and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Defaults to "pending" when omitted.
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,

    /// Defaults to "medium" when omitted.
    #[validate(length(min = 1, max = 50))]
    pub priority: Option<String>,
}

/// Partial update: only supplied fields change. There is deliberately no
/// `owner_id` field here; ownership is immutable.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskPatch {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub priority: Option<String>,
}

/// Query parameters for task listings.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Task {
    /// Builds a new task owned by `owner_id`, filling in defaults and
    /// setting both timestamps to now.
    pub fn new(input: TaskInput, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            priority: input.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges a patch field-by-field and refreshes `updated_at`. Fields the
    /// caller did not supply are left untouched.
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.updated_at = Utc::now();
    }
}
