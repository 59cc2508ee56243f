use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use axum_helpers::{JwtAuth, ValidatedJson};

use crate::error::UserError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Application state for auth handlers
#[derive(Clone)]
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt: JwtAuth,
}

/// OpenAPI documentation for the auth API
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(register, login),
    components(schemas(
        crate::models::RegisterRequest,
        crate::models::LoginRequest,
        crate::models::AuthResponse,
        crate::models::UserResponse
    ))
)]
pub struct AuthApiDoc;

/// Create the auth router (`/register`, `/login`)
pub fn router<R: UserRepository + Clone + 'static>(state: AuthState<R>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(state)
}

/// Register a new user
///
/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 409, description = "Username already taken"),
        (status = 400, description = "Validation failed")
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, UserError> {
    let user = state.service.register(input).await?;

    let token = state
        .jwt
        .create_token(user.id, &user.username)
        .map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// Login with username/password
///
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, UserError> {
    let user = state
        .service
        .verify_credentials(&input.username, &input.password)
        .await?;

    let token = state
        .jwt
        .create_token(user.id, &user.username)
        .map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
