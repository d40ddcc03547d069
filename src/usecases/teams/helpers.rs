use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    gate::payload::GatePayload,
    models::{brackets::Bracket, teams::Team, users::User},
    repositories::{teams as team_repo, users as user_repo},
};

pub(super) async fn require_user(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
    user_repo::find_user_by_id(pool, user_id)
        .await?
        .ok_or(AppError::Unauthorized(
            "User account no longer exists".to_string(),
        ))
}

/// Resolves the target team from whichever reference the payload carries:
/// `team_id` wins over `name`.
pub(super) async fn resolve_team(pool: &PgPool, payload: &GatePayload) -> Result<Team, AppError> {
    if let Some(team_id) = payload.team_id {
        return team_repo::find_team_by_id(pool, team_id)
            .await?
            .ok_or(AppError::NotFound(format!(
                "Team with id {} does not exist",
                team_id
            )));
    }

    if let Some(name) = payload.name.as_deref() {
        return team_repo::find_team_by_name(pool, name)
            .await?
            .ok_or(AppError::NotFound(format!("Team '{}' does not exist", name)));
    }

    Err(AppError::BadRequest(
        "No team id or name provided".to_string(),
    ))
}

/// Picks the governing bracket: the primary source (team pin, or an explicit
/// request field) wins, the user's own bracket is the fallback. Missing and
/// unrecognized values are distinct errors so staff can tell a data problem
/// from an unassigned user.
pub(super) fn effective_bracket(
    primary: Option<&str>,
    fallback: Option<&str>,
) -> Result<Bracket, AppError> {
    let Some(raw) = primary.or(fallback) else {
        return Err(AppError::BadRequest(
            "You do not have a bracket assigned. Contact event staff".to_string(),
        ));
    };

    Bracket::parse(raw).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unrecognized bracket '{}'. Contact event staff",
            raw.trim()
        ))
    })
}

/// Rejects when the team is already at its bracket's member limit. A team at
/// the limit admits no one; unlimited brackets never reject on count.
pub(super) fn ensure_team_capacity(
    team_name: &str,
    bracket: Bracket,
    member_count: i64,
) -> Result<(), AppError> {
    let Some(limit) = bracket.member_limit() else {
        return Ok(());
    };

    if member_count >= limit {
        return Err(AppError::BadRequest(format!(
            "Team '{}' is full. Bracket '{}' is limited to {} members and currently has {}",
            team_name, bracket, limit, member_count
        )));
    }

    Ok(())
}

/// Enforces the bracket's email-domain policy, when it has one.
pub(super) fn ensure_email_domain(email: &str, bracket: Bracket) -> Result<(), AppError> {
    let Some(suffix) = bracket.required_email_suffix() else {
        return Ok(());
    };

    if email_matches_suffix(email, suffix) {
        return Ok(());
    }

    Err(AppError::BadRequest(format!(
        "Bracket '{}' requires a {} email address",
        bracket, suffix
    )))
}

/// Case-insensitive domain match accepting the exact domain or any subdomain.
pub(super) fn email_matches_suffix(email: &str, suffix: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };

    let domain = domain.trim().to_ascii_lowercase();
    let suffix = suffix
        .trim()
        .trim_start_matches('@')
        .trim_start_matches('.')
        .to_ascii_lowercase();
    if suffix.is_empty() {
        return false;
    }

    domain == suffix || domain.ends_with(&format!(".{}", suffix))
}

#[cfg(test)]
mod tests {
    use super::{effective_bracket, email_matches_suffix, ensure_team_capacity};
    use crate::{error::AppError, models::brackets::Bracket};

    #[test]
    fn effective_bracket_prefers_primary_source() {
        let bracket = effective_bracket(Some("Open"), Some("PSU")).expect("bracket");
        assert_eq!(bracket, Bracket::Open);
    }

    #[test]
    fn effective_bracket_falls_back_to_user() {
        let bracket = effective_bracket(None, Some("PSU")).expect("bracket");
        assert_eq!(bracket, Bracket::Psu);
    }

    #[test]
    fn missing_bracket_is_a_bad_request() {
        let err = effective_bracket(None, None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn unknown_bracket_names_the_offending_value() {
        let err = effective_bracket(Some("Sponsors"), None).unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("Sponsors")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn full_team_admits_no_one() {
        assert!(ensure_team_capacity("Rustaceans", Bracket::Psu, 4).is_err());
        assert!(ensure_team_capacity("Rustaceans", Bracket::Psu, 5).is_err());
        assert!(ensure_team_capacity("Rustaceans", Bracket::Psu, 3).is_ok());
    }

    #[test]
    fn recount_including_concurrent_joiner_rejects() {
        // Three members when the join started, plus one that committed while
        // we waited on the team row lock: the authoritative recount sees 4
        // and the team admits no one further.
        assert!(ensure_team_capacity("Rustaceans", Bracket::Psu, 3).is_ok());
        assert!(ensure_team_capacity("Rustaceans", Bracket::Psu, 3 + 1).is_err());
    }

    #[test]
    fn unlimited_brackets_never_reject_on_count() {
        assert!(ensure_team_capacity("Rustaceans", Bracket::Open, 1000).is_ok());
        assert!(ensure_team_capacity("Rustaceans", Bracket::Educational, 1000).is_ok());
    }

    #[test]
    fn full_team_error_names_team_limit_and_count() {
        let err = ensure_team_capacity("Rustaceans", Bracket::Psu, 4).unwrap_err();
        match err {
            AppError::BadRequest(msg) => {
                assert!(msg.contains("Rustaceans"));
                assert!(msg.contains("PSU"));
                assert!(msg.contains('4'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn email_suffix_matches_domain_and_subdomains() {
        assert!(email_matches_suffix("alice@psu.edu", "psu.edu"));
        assert!(email_matches_suffix("alice@cs.psu.edu", "psu.edu"));
        assert!(email_matches_suffix("alice@PSU.EDU", "psu.edu"));
    }

    #[test]
    fn email_suffix_rejects_lookalike_domains() {
        assert!(!email_matches_suffix("alice@notpsu.edu", "psu.edu"));
        assert!(!email_matches_suffix("alice@psu.edu.evil.com", "psu.edu"));
        assert!(!email_matches_suffix("no-at-sign", "psu.edu"));
    }
}
