use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::teams::Team;

/// Request payload for creating a team.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub bracket: Option<String>,
}

/// Request payload for joining a team.
///
/// The target team may be referenced by id or by name; the gate accepts the
/// same fields before the handler runs.
#[derive(Clone, Deserialize)]
pub struct JoinTeamRequest {
    pub team_id: Option<Uuid>,
    pub name: Option<String>,
    pub invite_code: String,
}

impl fmt::Debug for JoinTeamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinTeamRequest")
            .field("team_id", &self.team_id)
            .field("name", &self.name)
            .field("invite_code", &"***")
            .finish()
    }
}

/// Team payload returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub bracket: Option<String>,
    pub captain_id: Uuid,
    pub member_count: i64,
    pub member_limit: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl TeamResponse {
    pub fn from_team(team: Team, member_count: i64, member_limit: Option<i64>) -> Self {
        Self {
            id: team.id,
            name: team.name,
            bracket: team.bracket,
            captain_id: team.captain_id,
            member_count,
            member_limit,
            created_at: team.created_at,
        }
    }
}

/// Response payload for team creation. The invite code is returned exactly
/// once; only its hash is stored.
#[derive(Serialize)]
pub struct CreateTeamResponse {
    pub team: TeamResponse,
    pub invite_code: String,
}

impl fmt::Debug for CreateTeamResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateTeamResponse")
            .field("team", &self.team)
            .field("invite_code", &"***")
            .finish()
    }
}

/// Team member payload.
#[derive(Debug, Serialize)]
pub struct TeamMemberResponse {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub bracket: Option<String>,
}

/// Response payload for team member lists.
#[derive(Debug, Serialize)]
pub struct TeamMembersResponse {
    pub data: Vec<TeamMemberResponse>,
}

/// Response payload for simple action messages.
#[derive(Debug, Serialize)]
pub struct TeamActionMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_join_invite_code() {
        let req = JoinTeamRequest {
            team_id: None,
            name: Some("Rustaceans".to_string()),
            invite_code: "secret_invite_code".to_string(),
        };
        let debug_output = format!("{:?}", req);
        assert!(debug_output.contains("***"));
        assert!(!debug_output.contains("secret_invite_code"));
        assert!(debug_output.contains("Rustaceans"));
    }
}
