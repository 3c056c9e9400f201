use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    auth::{
        hash_password, token, token::TokenConfig, verify_password, LoginRequest, RegisterRequest,
        TokenResponse,
    },
    error::AppError,
    models::UserOut,
    repo::user as user_repo,
};

/// Registers a new account with the default `user` role.
///
/// Fails with 400 when the email is taken and with 500 when the default role
/// has not been seeded.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    if user_repo::find_by_email(&pool, &register_data.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let role_id = user_repo::default_role_id(&pool).await?;
    let hashed_password = hash_password(&register_data.password)?;
    let user = user_repo::insert(&pool, &register_data.email, &hashed_password, role_id).await?;

    Ok(HttpResponse::Created().json(UserOut::from(user)))
}

/// Exchanges credentials for a bearer token.
///
/// Unknown email and wrong password answer identically with 401.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    token_config: web::Data<TokenConfig>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = user_repo::find_by_email(&pool, &login_data.email).await?;

    match user {
        Some(user) if verify_password(&login_data.password, &user.hashed_password) => {
            let access_token = token::issue(&token_config, user.id)?;
            Ok(HttpResponse::Ok().json(TokenResponse::bearer(access_token)))
        }
        _ => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use serde_json::json;
    use std::env;

    // Requires a running Postgres with the seeded schema.
    #[ignore]
    #[actix_rt::test]
    async fn test_register_validation() {
        dotenv::dotenv().ok();
        let pool = PgPool::connect(&env::var("DATABASE_URL").expect("DATABASE_URL not set"))
            .await
            .unwrap();

        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(pool))
                .service(register),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "email": "invalid-email",
                "password": "password123"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "email": "test@example.com",
                "password": "short"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }

    // Requires a running Postgres with the seeded schema.
    #[ignore]
    #[actix_rt::test]
    async fn test_login_validation() {
        dotenv::dotenv().ok();
        let pool = PgPool::connect(&env::var("DATABASE_URL").expect("DATABASE_URL not set"))
            .await
            .unwrap();

        let token_config = TokenConfig {
            secret: "route-test-secret".into(),
            ttl_minutes: 30,
        };

        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(pool))
                .app_data(web::Data::new(token_config))
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({
                "email": "invalid-email",
                "password": "password123"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
