pub mod extractors;
pub mod guard;
pub mod identity;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::AuthenticatedSubject;
pub use guard::{require_admin, require_owner_or_admin};
pub use identity::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};

/// Payload for a login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload for a registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    /// Must be at least 6 characters. Input longer than 72 bytes is accepted
    /// and clamped by the credential store.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
