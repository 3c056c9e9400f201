use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;
use taskhub::auth::token::TokenConfig;
use taskhub::auth::AuthMiddleware;
use taskhub::models::UserOut;
use taskhub::routes;
use uuid::Uuid;

// All tests here require a running Postgres with the seeded schema
// (cargo run --bin seed), hence #[ignore].

fn test_token_config() -> TokenConfig {
    TokenConfig {
        secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| "integration-test-secret".into()),
        ttl_minutes: 30,
    }
}

async fn connect() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB")
}

async fn cleanup_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

macro_rules! test_app {
    ($pool:expr, $token_config:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new($token_config.clone()))
                .wrap(AuthMiddleware::new($token_config.clone()))
                .wrap(Logger::default())
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .service(routes::health::health)
                .configure(routes::config),
        )
        .await
    };
}

async fn register(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> UserOut {
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "registration failed for {}", email);
    test::read_body_json(resp).await
}

async fn login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "login failed for {}", email);
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["access_token"].as_str().unwrap().to_string()
}

async fn admin_token(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
) -> String {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin@123".to_string());
    login(app, &email, &password).await
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[ignore]
#[actix_rt::test]
async fn test_user_routes_require_admin() {
    let pool = connect().await;
    let token_config = test_token_config();
    let email = format!("non-admin-{}@example.com", Uuid::new_v4());

    let app = test_app!(pool, token_config);
    let user = register(&app, &email, "pw123456").await;
    let token = login(&app, &email, "pw123456").await;

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    // Even reading their own row through the admin surface is forbidden.
    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);

    cleanup_user(&pool, &email).await;
}

#[ignore]
#[actix_rt::test]
async fn test_admin_user_crud() {
    let pool = connect().await;
    let token_config = test_token_config();
    let email = format!("managed-{}@example.com", Uuid::new_v4());
    let renamed = format!("renamed-{}@example.com", Uuid::new_v4());

    let app = test_app!(pool, token_config);
    let user = register(&app, &email, "pw123456").await;
    let admin = admin_token(&app).await;

    // List includes the new user.
    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let users: Vec<UserOut> = test::read_body_json(resp).await;
    assert!(users.iter().any(|u| u.id == user.id));

    // Update email and password; the new credentials must work.
    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "email": renamed, "password": "newpass123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let updated: UserOut = test::read_body_json(resp).await;
    assert_eq!(updated.email, renamed);

    let _token = login(&app, &renamed, "newpass123").await;

    // Delete cascades to owned tasks.
    let user_token = login(&app, &renamed, "newpass123").await;
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(bearer(&user_token))
        .set_json(json!({ "title": "doomed task" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let task: serde_json::Value = test::read_body_json(resp).await;
    let task_id = task["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

    cleanup_user(&pool, &renamed).await;
}

#[ignore]
#[actix_rt::test]
async fn test_delete_unknown_user_is_not_found() {
    let pool = connect().await;
    let token_config = test_token_config();

    let app = test_app!(pool, token_config);
    let admin = admin_token(&app).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", Uuid::new_v4()))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
}
