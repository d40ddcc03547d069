use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{error::AppError, models::teams::Team};

/// Returns the team by id if it exists.
pub async fn find_team_by_id(pool: &PgPool, team_id: Uuid) -> Result<Option<Team>, AppError> {
    let team = sqlx::query_as(
        r#"
            SELECT *
            FROM teams
            WHERE id = $1
            AND deleted_at IS NULL
        "#,
    )
    .bind(team_id)
    .fetch_optional(pool)
    .await?;

    Ok(team)
}

/// Returns the team by name if it exists. Names are unique case-insensitively.
pub async fn find_team_by_name(pool: &PgPool, name: &str) -> Result<Option<Team>, AppError> {
    let team = sqlx::query_as(
        r#"
            SELECT *
            FROM teams
            WHERE LOWER(name) = LOWER($1)
            AND deleted_at IS NULL
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(team)
}

/// Checks whether a team name is already taken.
pub async fn team_name_exists(pool: &PgPool, name: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
            SELECT EXISTS (
                SELECT 1
                FROM teams
                WHERE LOWER(name) = LOWER($1)
                AND deleted_at IS NULL
            )
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Takes a row lock on the team so concurrent joins serialize. A member
/// count taken afterwards in the same transaction starts its own statement
/// snapshot, so it includes any joiner that committed while we waited.
pub async fn lock_team_for_update(
    tx: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
            SELECT id
            FROM teams
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(team_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Inserts a new team and returns the created row.
pub async fn insert_team(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    bracket: Option<&str>,
    captain_id: Uuid,
    invite_code_hash: &str,
) -> Result<Team, AppError> {
    let team = sqlx::query_as(
        r#"
            INSERT INTO teams (id, name, bracket, captain_id, invite_code_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(bracket)
    .bind(captain_id)
    .bind(invite_code_hash)
    .fetch_one(&mut **tx)
    .await?;

    Ok(team)
}
