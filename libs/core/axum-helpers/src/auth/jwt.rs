use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use core_config::{ConfigError, FromEnv, env_parse_or_default, env_required};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::errors::ErrorResponse;

/// JWT configuration loaded from the environment
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// Shared HS256 signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env_required("JWT_SECRET")?,
            token_ttl_secs: env_parse_or_default("JWT_TTL_SECS", 3600)?,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user id)
    pub sub: String,
    /// Username, carried for logging and display
    pub name: String,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
}

/// Authentication failures surfaced by the gate.
///
/// All variants except `NotConfigured` render as 401 with a structured body.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingToken,

    #[error("Bearer token is invalid")]
    InvalidToken,

    #[error("Bearer token has expired")]
    ExpiredToken,

    #[error("Authentication is not configured for this router")]
    NotConfigured,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "missing_token"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "expired_token"),
            AuthError::NotConfigured => {
                tracing::error!("AuthUser extracted from a router without a JwtAuth extension");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = Json(ErrorResponse::new(error_type, self.to_string()));
        (status, body).into_response()
    }
}

/// Stateless JWT signer/verifier over a shared secret.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
    token_ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            token_ttl_secs: config.token_ttl_secs,
        }
    }

    /// Create a signed token for the given user identity.
    pub fn create_token(&self, user_id: Uuid, username: &str) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            name: username.to_string(),
            exp: (now + Duration::seconds(self.token_ttl_secs)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_with_ttl(ttl: i64) -> JwtAuth {
        JwtAuth::new(&JwtConfig {
            secret: "test-secret".to_string(),
            token_ttl_secs: ttl,
        })
    }

    #[test]
    fn test_token_round_trip() {
        let auth = auth_with_ttl(3600);
        let user_id = Uuid::now_v7();

        let token = auth.create_token(user_id, "alice").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.name, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let auth = auth_with_ttl(-120);
        let token = auth.create_token(Uuid::now_v7(), "alice").unwrap();

        assert!(matches!(
            auth.verify_token(&token),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let auth = auth_with_ttl(3600);

        assert!(matches!(
            auth.verify_token("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = auth_with_ttl(3600);
        let verifier = JwtAuth::new(&JwtConfig {
            secret: "other-secret".to_string(),
            token_ttl_secs: 3600,
        });

        let token = signer.create_token(Uuid::now_v7(), "alice").unwrap();
        assert!(matches!(
            verifier.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }
}
