use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    app::state::AppState,
    auth::middleware::AuthUser,
    dto::teams::{
        CreateTeamRequest, CreateTeamResponse, JoinTeamRequest, TeamActionMessage,
        TeamMembersResponse, TeamResponse,
    },
    error::AppError,
    usecases::teams::TeamService,
};

/// Creates a team with the current user as captain.
pub async fn create_team_handle(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<CreateTeamResponse>), AppError> {
    let response = TeamService::create_team(&state.db, auth_user.user_id, req).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Joins the current user to a team.
pub async fn join_team_handle(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(req): Json<JoinTeamRequest>,
) -> Result<Json<TeamActionMessage>, AppError> {
    let response = TeamService::join_team(&state.db, auth_user.user_id, req).await?;

    Ok(Json(response))
}

/// Returns a team with its member count and bracket limit.
pub async fn get_team_handle(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamResponse>, AppError> {
    let response = TeamService::get_team(&state.db, team_id).await?;

    Ok(Json(response))
}

/// Lists members of a team.
pub async fn list_team_members_handle(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamMembersResponse>, AppError> {
    let response = TeamService::list_members(&state.db, team_id).await?;

    Ok(Json(response))
}
