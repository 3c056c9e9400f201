use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// The verified token subject, placed in request extensions by
/// [`crate::auth::middleware::AuthMiddleware`].
///
/// Handlers take this as a parameter and pass it to
/// [`crate::auth::identity::resolve`] to load the full identity. If it is
/// missing the middleware did not run on this route; Unauthorized is the safe
/// answer.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedSubject(pub Uuid);

impl FromRequest for AuthenticatedSubject {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedSubject>().copied() {
            Some(subject) => ready(Ok(subject)),
            None => {
                let err = AppError::Unauthorized("Missing authentication".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
