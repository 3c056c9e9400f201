use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A role referenced by zero or more users. Seeded once (`admin`, `user`)
/// and read-mostly thereafter.
///
/// The `permissions` and `role_has_permissions` tables exist in the schema
/// for compatibility but have no consuming logic.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
}
