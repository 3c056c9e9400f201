//!
//! # Error handling
//!
//! A single [`AppError`] enum covers every failure a handler can return.
//! It implements `actix_web::error::ResponseError`, so handlers propagate
//! errors with `?` and actix renders them as the JSON error envelope
//! `{"success": false, "error": <message>}` with the matching status code.
//!
//! `From` impls cover `sqlx::Error`, `validator::ValidationErrors` and
//! `bcrypt::BcryptError`; token failures convert via
//! [`crate::auth::token::TokenError`]. Database and internal messages are
//! logged server-side and replaced with a generic message in the response,
//! so driver text never leaks to clients.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All failure modes surfaced by the API.
#[derive(Debug)]
pub enum AppError {
    /// Missing, invalid or expired credentials (HTTP 401).
    Unauthorized(String),
    /// Authenticated but not permitted (HTTP 403).
    Forbidden(String),
    /// Requested resource absent (HTTP 404).
    NotFound(String),
    /// Request conflicts with existing state, e.g. a duplicate email (HTTP 400).
    Conflict(String),
    /// Input failed validation (HTTP 422).
    Validation(String),
    /// Persistence failure (HTTP 500). The message stays server-side.
    Database(String),
    /// Anything unexpected (HTTP 500). The message stays server-side.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

fn envelope(error: &str) -> serde_json::Value {
    json!({
        "success": false,
        "error": error
    })
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(envelope(msg)),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(envelope(msg)),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(envelope(msg)),
            // Duplicate registration responds 400 rather than 409; clients
            // depend on that status.
            AppError::Conflict(msg) => HttpResponse::BadRequest().json(envelope(msg)),
            AppError::Validation(msg) => HttpResponse::UnprocessableEntity().json(envelope(msg)),
            AppError::Database(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(envelope("Database error occurred"))
            }
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(envelope("Internal server error"))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            // Unique violation (Postgres 23505): the pre-insert existence
            // checks race, so a concurrent duplicate lands here instead.
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::Conflict("Email already registered".into())
            }
            sqlx::Error::Database(db) => AppError::Database(db.to_string()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing failed: {}", error))
    }
}
