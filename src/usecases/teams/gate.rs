use sqlx::PgPool;

use crate::{
    error::AppError, gate::payload::GatePayload, models::users::User,
    repositories::users as user_repo,
};

use super::{TeamService, helpers};

impl TeamService {
    /// Gate check for a join request: the team must resolve, its bracket must
    /// have room, and the user's email must satisfy the bracket's domain
    /// policy. Read-only; the transactional re-check happens in `join_team`.
    pub async fn check_join(
        pool: &PgPool,
        user: &User,
        payload: &GatePayload,
    ) -> Result<(), AppError> {
        let team = helpers::resolve_team(pool, payload).await?;
        let bracket = helpers::effective_bracket(team.bracket.as_deref(), user.bracket.as_deref())?;

        let member_count = user_repo::count_team_members(pool, team.id).await?;
        tracing::debug!(
            team = %team.name,
            bracket = %bracket,
            member_count,
            limit = ?bracket.member_limit(),
            "Join request against bracket limits"
        );
        helpers::ensure_team_capacity(&team.name, bracket, member_count)?;
        helpers::ensure_email_domain(&user.email, bracket)?;

        Ok(())
    }

    /// Gate check for a creation request: the requester must be teamless and
    /// the bracket (requested or their own) must accept them. Name uniqueness
    /// is left to the handler.
    pub fn check_create(user: &User, payload: &GatePayload) -> Result<(), AppError> {
        if user.team_id.is_some() {
            return Err(AppError::BadRequest(
                "You already belong to a team".to_string(),
            ));
        }

        if payload.name.is_none() {
            return Err(AppError::BadRequest("No team name provided".to_string()));
        }

        let bracket =
            helpers::effective_bracket(payload.bracket.as_deref(), user.bracket.as_deref())?;
        helpers::ensure_email_domain(&user.email, bracket)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::TeamService;
    use crate::{error::AppError, gate::payload::GatePayload, models::users::User};

    fn user(email: &str, bracket: Option<&str>, team_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: "tester".to_string(),
            display_name: "Tester".to_string(),
            password_hash: None,
            bracket: bracket.map(str::to_string),
            team_id,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn create_payload(name: &str, bracket: Option<&str>) -> GatePayload {
        GatePayload {
            team_id: None,
            name: Some(name.to_string()),
            bracket: bracket.map(str::to_string),
        }
    }

    #[test]
    fn create_rejected_when_already_on_a_team() {
        let user = user("alice@example.com", Some("Open"), Some(Uuid::new_v4()));
        let err = TeamService::check_create(&user, &create_payload("Rustaceans", None)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn create_requires_a_team_name() {
        let user = user("alice@example.com", Some("Open"), None);
        let err = TeamService::check_create(&user, &GatePayload::default()).unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("name")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn create_requires_a_bracket_from_request_or_user() {
        let user = user("alice@example.com", None, None);
        let err = TeamService::check_create(&user, &create_payload("Rustaceans", None)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn create_enforces_bracket_email_domain() {
        let user = user("alice@gmail.com", None, None);
        let err =
            TeamService::check_create(&user, &create_payload("Rustaceans", Some("PSU"))).unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("psu.edu")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn create_allowed_for_compliant_request() {
        let user = user("alice@cs.psu.edu", Some("PSU"), None);
        assert!(TeamService::check_create(&user, &create_payload("Rustaceans", None)).is_ok());
    }
}
