use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_seconds: u64,
    pub invite_token_salt: String,
    pub invite_expiry_hours: i64,
    pub max_invite_batch: usize,
    pub frontend_host: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            database_url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?,
            jwt_secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingJwtSecret)?,
            jwt_expiry_seconds: env::var("JWT_EXPIRY_SECONDS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .unwrap_or(900),
            invite_token_salt: env::var("INVITE_TOKEN_SALT")
                .map_err(|_| ConfigError::MissingInviteTokenSalt)?,
            invite_expiry_hours: env::var("INVITE_EXPIRY_HOURS")
                .unwrap_or_else(|_| "168".to_string())
                .parse()
                .unwrap_or(168),
            max_invite_batch: env::var("MAX_INVITE_BATCH")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
            frontend_host: env::var("FRONTEND_HOST").ok(),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,
    #[error("JWT_SECRET environment variable is required")]
    MissingJwtSecret,
    #[error("INVITE_TOKEN_SALT environment variable is required")]
    MissingInviteTokenSalt,
}
