use std::env;

use crate::auth::token::TokenConfig;

/// Runtime configuration, read once at startup.
///
/// The token settings are carried as a [`TokenConfig`] value that is handed
/// explicitly to the issuer/verifier and the auth middleware, so no component
/// reads the signing secret from the environment at call time.
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub token: TokenConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            token: TokenConfig {
                secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
                ttl_minutes: env::var("TOKEN_TTL_MINUTES")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("TOKEN_TTL_MINUTES must be a number"),
            },
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
