use crate::error::AppError;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signing secret and validity window for issued tokens.
///
/// Constructed once in `main` from [`crate::config::Config`] and passed to
/// the issuer, the verifier and the auth middleware.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

/// Claims encoded in an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's id as a UUID string.
    pub sub: Option<String>,
    /// Expiration, seconds since epoch.
    pub exp: i64,
}

/// Why a token failed verification. Converts to a 401 response.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed token or signature mismatch.
    InvalidToken,
    /// Signature valid but past the expiration timestamp.
    Expired,
    /// Signature valid but no subject claim present.
    MissingSubject,
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        let msg = match error {
            TokenError::InvalidToken => "Invalid token",
            TokenError::Expired => "Token has expired",
            TokenError::MissingSubject => "Token has no subject",
        };
        AppError::Unauthorized(msg.into())
    }
}

/// Issues a signed HS256 token for `subject`, expiring `ttl_minutes` from now.
pub fn issue(config: &TokenConfig, subject: Uuid) -> Result<String, AppError> {
    let expiration = chrono::Utc::now() + chrono::Duration::minutes(config.ttl_minutes);

    let claims = Claims {
        sub: Some(subject.to_string()),
        exp: expiration.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to issue token: {}", e)))
}

/// Verifies signature and expiration, then extracts the subject.
///
/// The signature is checked before any claim is trusted; a structurally
/// valid token whose `sub` is absent or not a UUID never authenticates.
pub fn verify(config: &TokenConfig, token: &str) -> Result<Uuid, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::InvalidToken,
    })?;

    let subject = data.claims.sub.ok_or(TokenError::MissingSubject)?;
    Uuid::parse_str(&subject).map_err(|_| TokenError::InvalidToken)
}
