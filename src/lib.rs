#![doc = "The `taskhub` library crate."]
#![doc = ""]
#![doc = "Multi-tenant task tracking: registration/login with bcrypt password hashing"]
#![doc = "and JWT issuance, role-based access control (admin vs. regular user), and"]
#![doc = "CRUD over tasks owned by users. The binary in `main.rs` wires these modules"]
#![doc = "into an actix-web application; `bin/seed.rs` prepares the schema and roles."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod routes;
pub mod seed;
