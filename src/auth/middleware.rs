use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedSubject;
use crate::auth::token::{self, TokenConfig};
use crate::error::AppError;

/// Bearer-token middleware.
///
/// Verifies the `Authorization: Bearer <token>` header on every request
/// except the public endpoints, and inserts the verified subject into
/// request extensions for the [`AuthenticatedSubject`] extractor. Identity
/// resolution (loading the user row and its role) happens per handler, after
/// this check.
pub struct AuthMiddleware {
    token_config: TokenConfig,
}

impl AuthMiddleware {
    pub fn new(token_config: TokenConfig) -> Self {
        Self { token_config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            token_config: self.token_config.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    token_config: TokenConfig,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Registration, login and the health probe stay public.
        let path = req.path();
        if path == "/health" || path == "/auth/login" || path == "/auth/register" {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(raw_token) => match token::verify(&self.token_config, raw_token) {
                Ok(subject) => {
                    req.extensions_mut().insert(AuthenticatedSubject(subject));
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(token_err) => {
                    let app_err: AppError = token_err.into();
                    Box::pin(async move { Err(app_err.into()) })
                }
            },
            None => {
                let app_err = AppError::Unauthorized("Missing token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
