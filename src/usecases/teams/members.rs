use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dto::teams::{TeamMemberResponse, TeamMembersResponse, TeamResponse},
    error::AppError,
    models::brackets::Bracket,
    repositories::{teams as team_repo, users as user_repo},
};

use super::TeamService;

impl TeamService {
    /// Returns a team with its current member count and bracket limit.
    pub async fn get_team(pool: &PgPool, team_id: Uuid) -> Result<TeamResponse, AppError> {
        let team = team_repo::find_team_by_id(pool, team_id)
            .await?
            .ok_or(AppError::NotFound("Team not found".to_string()))?;

        let member_count = user_repo::count_team_members(pool, team.id).await?;
        let member_limit = team
            .bracket
            .as_deref()
            .and_then(Bracket::parse)
            .and_then(Bracket::member_limit);

        Ok(TeamResponse::from_team(team, member_count, member_limit))
    }

    /// Lists team members.
    pub async fn list_members(
        pool: &PgPool,
        team_id: Uuid,
    ) -> Result<TeamMembersResponse, AppError> {
        if team_repo::find_team_by_id(pool, team_id).await?.is_none() {
            return Err(AppError::NotFound("Team not found".to_string()));
        }

        let rows = user_repo::list_team_members(pool, team_id).await?;
        let data = rows
            .into_iter()
            .map(|row| TeamMemberResponse {
                id: row.id,
                username: row.username,
                display_name: row.display_name,
                bracket: row.bracket,
            })
            .collect();

        Ok(TeamMembersResponse { data })
    }
}
