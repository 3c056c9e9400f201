use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt ignores everything past 72 bytes and some backends reject longer
/// input outright, so passwords are clamped before hashing *and* before
/// verification. A cut that would land inside a multi-byte character backs
/// off to the previous boundary, dropping the partial character.
const MAX_PASSWORD_BYTES: usize = 72;

const BCRYPT_COST: u32 = 12;

fn truncate_password(password: &str) -> &str {
    if password.len() <= MAX_PASSWORD_BYTES {
        return password;
    }
    let mut end = MAX_PASSWORD_BYTES;
    while !password.is_char_boundary(end) {
        end -= 1;
    }
    &password[..end]
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let hashed = hash(truncate_password(password), BCRYPT_COST)?;
    Ok(hashed)
}

/// Checks a candidate password against a stored hash.
///
/// Malformed stored hashes yield `false` rather than an error, so a corrupt
/// row can never turn a login attempt into a 500.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(truncate_password(password), hashed_password).unwrap_or(false)
}
