use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::invite_codes::{generate_invite_code, hash_invite_code},
    dto::teams::{CreateTeamRequest, CreateTeamResponse, JoinTeamRequest, TeamActionMessage, TeamResponse},
    error::AppError,
    gate::payload::GatePayload,
    repositories::{teams as team_repo, users as user_repo},
};

mod gate;
mod helpers;
mod members;

/// Business logic for team management.
pub struct TeamService;

impl TeamService {
    /// Creates a team and attaches the creator as captain and first member.
    pub async fn create_team(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateTeamRequest,
    ) -> Result<CreateTeamResponse, AppError> {
        let user = helpers::require_user(pool, user_id).await?;
        if user.team_id.is_some() {
            return Err(AppError::BadRequest(
                "You already belong to a team".to_string(),
            ));
        }

        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Team name is required".to_string(),
            ));
        }
        if name.chars().count() > 128 {
            return Err(AppError::ValidationError(
                "Team name must be 1-128 characters".to_string(),
            ));
        }

        let requested_bracket = req
            .bracket
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let bracket = helpers::effective_bracket(requested_bracket, user.bracket.as_deref())?;
        helpers::ensure_email_domain(&user.email, bracket)?;

        if team_repo::team_name_exists(pool, name).await? {
            return Err(AppError::Conflict("Team name already exists".to_string()));
        }

        let invite_code = generate_invite_code();
        let invite_code_hash = hash_invite_code(&invite_code);

        let mut tx = pool.begin().await?;
        let team =
            team_repo::insert_team(&mut tx, name, Some(bracket.as_str()), user.id, &invite_code_hash)
                .await?;
        user_repo::attach_user_to_team(&mut tx, user.id, team.id).await?;
        tx.commit().await?;

        tracing::info!(team = %team.name, bracket = %bracket, captain = %user.username, "Team created");

        Ok(CreateTeamResponse {
            team: TeamResponse::from_team(team, 1, bracket.member_limit()),
            invite_code,
        })
    }

    /// Joins the current user to a team after verifying the invite code and
    /// re-checking capacity under the team row lock. The gate already vetted
    /// the request, but the count here is the authoritative one.
    pub async fn join_team(
        pool: &PgPool,
        user_id: Uuid,
        req: JoinTeamRequest,
    ) -> Result<TeamActionMessage, AppError> {
        let user = helpers::require_user(pool, user_id).await?;
        if user.team_id.is_some() {
            return Err(AppError::BadRequest(
                "You already belong to a team".to_string(),
            ));
        }

        let reference = GatePayload {
            team_id: req.team_id,
            name: req.name.clone(),
            bracket: None,
        };
        let team = helpers::resolve_team(pool, &reference).await?;

        if hash_invite_code(&req.invite_code) != team.invite_code_hash {
            return Err(AppError::Forbidden("Invalid invite code".to_string()));
        }

        let bracket = helpers::effective_bracket(team.bracket.as_deref(), user.bracket.as_deref())?;
        helpers::ensure_email_domain(&user.email, bracket)?;

        let mut tx = pool.begin().await?;
        // Serialize concurrent joins on the team row; the count below then
        // includes any joiner that committed while we waited for the lock.
        team_repo::lock_team_for_update(&mut tx, team.id).await?;
        let member_count = user_repo::count_team_members_in_tx(&mut tx, team.id).await?;
        helpers::ensure_team_capacity(&team.name, bracket, member_count)?;
        user_repo::attach_user_to_team(&mut tx, user.id, team.id).await?;
        tx.commit().await?;

        tracing::info!(team = %team.name, user = %user.username, "User joined team");

        Ok(TeamActionMessage {
            message: format!("Joined team '{}'", team.name),
        })
    }
}
