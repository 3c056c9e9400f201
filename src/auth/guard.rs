//!
//! # Authorization guard
//!
//! The single enforcement point for admission decisions. Every route needing
//! "admin only" or "owner or admin" calls one of these predicates; no handler
//! compares role strings or owner ids inline.

use crate::auth::identity::CurrentUser;
use crate::error::AppError;
use uuid::Uuid;

/// Role name granting elevated privilege. Compared case-insensitively, so a
/// seed that wrote `ADMIN` still elevates.
pub const ADMIN_ROLE: &str = "admin";

pub fn is_admin(user: &CurrentUser) -> bool {
    user.role
        .as_deref()
        .map_or(false, |name| name.eq_ignore_ascii_case(ADMIN_ROLE))
}

/// Admits only admins. A missing role is Forbidden, never an error.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if is_admin(user) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin privileges required".into()))
    }
}

/// Admits the owner of a resource, or any admin.
pub fn require_owner_or_admin(user: &CurrentUser, resource_owner_id: Uuid) -> Result<(), AppError> {
    if user.id == resource_owner_id || is_admin(user) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Not permitted to access this resource".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "someone@example.com".into(),
            role: role.map(String::from),
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user_with_role(Some("admin"))).is_ok());
        assert!(require_admin(&user_with_role(Some("user"))).is_err());
        assert!(require_admin(&user_with_role(None)).is_err());
    }

    #[test]
    fn test_admin_check_is_case_insensitive() {
        assert!(require_admin(&user_with_role(Some("ADMIN"))).is_ok());
        assert!(require_admin(&user_with_role(Some("Admin"))).is_ok());
        assert!(require_admin(&user_with_role(Some("administrator"))).is_err());
    }

    #[test]
    fn test_missing_role_is_forbidden_not_error() {
        match require_admin(&user_with_role(None)) {
            Err(AppError::Forbidden(_)) => {}
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    // Exhaustive owner/non-owner x admin/non-admin table.
    #[test]
    fn test_owner_or_admin_truth_table() {
        let owner_id = Uuid::new_v4();

        let mut owner_admin = user_with_role(Some("admin"));
        owner_admin.id = owner_id;
        assert!(require_owner_or_admin(&owner_admin, owner_id).is_ok());

        let mut owner_plain = user_with_role(Some("user"));
        owner_plain.id = owner_id;
        assert!(require_owner_or_admin(&owner_plain, owner_id).is_ok());

        let stranger_admin = user_with_role(Some("admin"));
        assert!(require_owner_or_admin(&stranger_admin, owner_id).is_ok());

        let stranger_plain = user_with_role(Some("user"));
        assert!(require_owner_or_admin(&stranger_plain, owner_id).is_err());
    }

    #[test]
    fn test_owner_without_role_is_still_owner() {
        let mut owner = user_with_role(None);
        let owner_id = Uuid::new_v4();
        owner.id = owner_id;
        assert!(require_owner_or_admin(&owner, owner_id).is_ok());

        let stranger = user_with_role(None);
        assert!(require_owner_or_admin(&stranger, owner_id).is_err());
    }
}
