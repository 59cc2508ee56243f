use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use uuid::Uuid;

use super::jwt::{AuthError, JwtAuth};

/// Authenticated caller identity, resolved from the bearer token.
///
/// Taking `AuthUser` as a handler parameter makes authentication a typed
/// precondition: the handler body never runs without a verified identity,
/// and rejections short-circuit as structured 401 responses.
///
/// Requires a [`JwtAuth`] extension on the router
/// (`.layer(Extension(jwt_auth))`).
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<JwtAuth>()
            .cloned()
            .ok_or(AuthError::NotConfigured)?;

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|rejection| {
                if rejection.is_missing() {
                    AuthError::MissingToken
                } else {
                    AuthError::InvalidToken
                }
            })?;

        let claims = auth.verify_token(bearer.token())?;

        let id = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthUser {
            id,
            username: claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{JwtAuth, JwtConfig};
    use axum::{Extension, Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn jwt_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig {
            secret: "extractor-secret".to_string(),
            token_ttl_secs: 3600,
        })
    }

    async fn whoami(user: AuthUser) -> String {
        user.username
    }

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(Extension(auth))
    }

    #[tokio::test]
    async fn test_valid_token_resolves_identity() {
        let auth = jwt_auth();
        let token = auth.create_token(Uuid::now_v7(), "alice").unwrap();

        let response = app(auth)
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header_is_401() {
        let response = app(jwt_auth())
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_mangled_token_is_401() {
        let response = app(jwt_auth())
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("authorization", "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
