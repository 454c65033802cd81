//! Handlers for the `/auth` resource (signup, signin, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use skilltrack_core::error::CoreError;
use skilltrack_db::models::user::{CreateUser, UserResponse};
use skilltrack_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::validate::{validate_email, validate_name, validate_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication payload returned by signup and signin.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub access_token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Validate input, reject duplicate emails with 409, hash the password, and
/// create the user at zero XP / level 1. Returns a token so the dashboard
/// can log the user straight in.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthData>>)> {
    let name = input.name.trim().to_string();
    let email = input.email.trim().to_lowercase();

    validate_name(&name)?;
    validate_email(&email)?;
    validate_password(&input.password)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered. Please sign in.".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name,
            email,
            password_hash,
        },
    )
    .await?;

    let data = auth_data(&state, &user)?;
    Ok(ApiResponse::created(
        "Account created successfully! Redirecting to dashboard...",
        data,
    ))
}

/// POST /api/auth/signin
///
/// Authenticate with email + password. Both unknown email and wrong
/// password return the same 401 message so the endpoint does not leak
/// which emails exist.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthData>>)> {
    let email = input.email.trim().to_lowercase();

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let data = auth_data(&state, &user)?;
    Ok(ApiResponse::ok(
        format!("Welcome back, {}!", user.name),
        data,
    ))
}

/// GET /api/auth/me
///
/// Return the authenticated user's profile. 401 if the token's user no
/// longer exists.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "User not found. Please login again.".into(),
            ))
        })?;

    Ok(ApiResponse::ok(
        "User is authenticated",
        UserResponse::from(&user),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate an access token and build the auth payload.
fn auth_data(
    state: &AppState,
    user: &skilltrack_db::models::user::User,
) -> Result<AuthData, AppError> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthData {
        access_token,
        user: UserResponse::from(user),
    })
}
