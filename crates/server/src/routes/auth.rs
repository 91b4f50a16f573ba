//! Authentication route handlers.
//!
//! Registration, login, and the current-user endpoint. Registration and
//! login both answer with a bearer token; the client sends it back on every
//! protected request.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use cartify_core::{Email, Role, UserId};

use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::user::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Requested role; must name one of the closed set.
    pub role: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response for register/login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_owned(),
        }
    }
}

/// Public view of a user account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub rewards: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            avatar: user.avatar,
            phone: user.phone,
            address: user.address,
            rewards: user.rewards,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a new account and return a token for immediate use.
///
/// # Errors
///
/// Returns 400 for an invalid role, invalid email, weak password, or an
/// already-registered email.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>> {
    // The closed role set is enforced here, at the boundary
    let role: Role = body.role.parse().map_err(AppError::InvalidRequest)?;

    let auth = AuthService::new(state.pool(), state.tokens());
    let (user, token) = auth
        .register(&body.name, &body.email, &body.password, role)
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user registered");

    Ok(Json(TokenResponse::bearer(token)))
}

/// Login with email and password.
///
/// # Errors
///
/// Returns 401 uniformly whether the email is unknown or the password is
/// wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());
    let (user, token) = auth.login(&body.email, &body.password).await.map_err(|e| {
        tracing::warn!("login failed: {e}");
        e
    })?;

    tracing::debug!(user_id = %user.id, "user logged in");

    Ok(Json(TokenResponse::bearer(token)))
}

/// Return the authenticated caller's profile.
///
/// # Errors
///
/// Returns 401 without a valid token, 404 if the account no longer exists.
pub async fn me(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>> {
    let user = AuthService::new(state.pool(), state.tokens())
        .get_user(identity.id)
        .await?;

    Ok(Json(user.into()))
}
