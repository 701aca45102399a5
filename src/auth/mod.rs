use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Claims;
use crate::state::AppState;

/// JWT Authentication Service.
///
/// Validates bearer tokens issued by the surrounding platform; this
/// service never mints tokens for end users itself outside of tests.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_seconds: u64,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expiry_seconds: config.jwt_expiry_seconds,
        }
    }

    /// Generate a JWT token for a user
    pub fn generate_token(&self, user_id: &str, email: &str) -> Result<String> {
        let now = Utc::now().timestamp();
        let exp = now + self.expiry_seconds as i64;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a JWT token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

/// The caller behind a bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let claims = state.auth.validate_token(token)?;
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid subject claim".to_string()))?;

        Ok(AuthenticatedUser {
            id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_host: "localhost".to_string(),
            server_port: 8080,
            database_url: "postgres://localhost/test".to_string(),
            jwt_secret: "test-secret-key".to_string(),
            jwt_expiry_seconds: 900,
            invite_token_salt: "test-salt".to_string(),
            invite_expiry_hours: 168,
            max_invite_batch: 100,
            frontend_host: None,
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let auth = AuthService::new(&config);

        let token = auth
            .generate_token("user-123", "alice@example.com")
            .expect("Should generate token");

        let claims = auth.validate_token(&token).expect("Should validate token");

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email, "alice@example.com");
    }

    #[test]
    fn test_invalid_token() {
        let config = test_config();
        let auth = AuthService::new(&config);

        let result = auth.validate_token("invalid-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let config = test_config();
        let auth = AuthService::new(&config);

        let mut other_config = test_config();
        other_config.jwt_secret = "another-secret".to_string();
        let other = AuthService::new(&other_config);

        let token = other
            .generate_token("user-123", "alice@example.com")
            .expect("Should generate token");

        assert!(auth.validate_token(&token).is_err());
    }
}
