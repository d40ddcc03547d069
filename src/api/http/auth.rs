use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    app::state::AppState,
    auth::middleware::AuthUser,
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    error::AppError,
    usecases::auth::AuthService,
};

/// Registers an account and returns a session token.
pub async fn register_handle(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    let response = AuthService::register(&state.db, &state.jwt_config, req).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Verifies credentials and returns a session token.
pub async fn login_handle(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, &state.jwt_config, req).await?;

    Ok(Json(response))
}

/// Returns the current user's profile.
pub async fn get_me_handle(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let response = AuthService::me(&state.db, auth_user.user_id).await?;

    Ok(Json(response))
}
