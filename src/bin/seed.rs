//! Seeds the database: schema, `admin`/`user` roles, and an initial admin
//! account. Run once before starting the server for the first time.

use sqlx::PgPool;
use taskhub::seed;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let admin_email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin@123".to_string());

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    seed::run(&pool, &admin_email, &admin_password)
        .await
        .expect("Seeding failed");

    println!("Seed complete: roles ready, admin account {}", admin_email);
}
