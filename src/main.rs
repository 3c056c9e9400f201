use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use taskhub::{auth::AuthMiddleware, config::Config, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    let token_config = config.token.clone();

    log::info!("Starting taskhub server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(token_config.clone()))
            // Wraps run in reverse registration order: Cors answers
            // preflights before the auth check sees them.
            .wrap(AuthMiddleware::new(token_config.clone()))
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind((config.server_host.clone(), config.server_port))?
    .run()
    .await
}
