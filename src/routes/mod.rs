pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login),
    )
    .service(
        web::scope("/tasks")
            // `/me` must register before `/{id}` so it is not captured as an id.
            .service(tasks::my_tasks)
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/users")
            .service(users::list_users)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user),
    );
}
