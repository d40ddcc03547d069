use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{error::AppError, models::users::User};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TeamMemberRow {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub bracket: Option<String>,
}

/// Returns the user by id if the account is still active.
pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as(
        r#"
            SELECT *
            FROM users
            WHERE id = $1
            AND is_active
            AND deleted_at IS NULL
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Returns the user by email if the account is still active.
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as(
        r#"
            SELECT *
            FROM users
            WHERE LOWER(email) = LOWER($1)
            AND is_active
            AND deleted_at IS NULL
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Checks whether an email address is already registered.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
            SELECT EXISTS (
                SELECT 1
                FROM users
                WHERE LOWER(email) = LOWER($1)
                AND deleted_at IS NULL
            )
        "#,
    )
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Checks whether a username is already taken.
pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
            SELECT EXISTS (
                SELECT 1
                FROM users
                WHERE LOWER(username) = LOWER($1)
                AND deleted_at IS NULL
            )
        "#,
    )
    .bind(username)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Inserts a new user and returns the created row.
pub async fn insert_user(
    pool: &PgPool,
    email: &str,
    username: &str,
    display_name: &str,
    password_hash: &str,
    bracket: Option<&str>,
) -> Result<User, AppError> {
    let user = sqlx::query_as(
        r#"
            INSERT INTO users (id, email, username, display_name, password_hash, bracket)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(username)
    .bind(display_name)
    .bind(password_hash)
    .bind(bracket)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Counts active members of a team.
pub async fn count_team_members(pool: &PgPool, team_id: Uuid) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
            SELECT COUNT(*)
            FROM users
            WHERE team_id = $1
            AND is_active
            AND deleted_at IS NULL
        "#,
    )
    .bind(team_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Counts active members of a team inside a transaction. Callers that need
/// the count to hold must take the team row lock first; locking member rows
/// here would not cover rows that join the team after our snapshot.
pub async fn count_team_members_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
            SELECT COUNT(*)
            FROM users
            WHERE team_id = $1
            AND is_active
            AND deleted_at IS NULL
        "#,
    )
    .bind(team_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(count)
}

/// Attaches a user to a team.
pub async fn attach_user_to_team(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    team_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
            UPDATE users
            SET team_id = $2, updated_at = NOW()
            WHERE id = $1
            AND deleted_at IS NULL
        "#,
    )
    .bind(user_id)
    .bind(team_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Lists active members of a team.
pub async fn list_team_members(
    pool: &PgPool,
    team_id: Uuid,
) -> Result<Vec<TeamMemberRow>, AppError> {
    let rows = sqlx::query_as::<_, TeamMemberRow>(
        r#"
            SELECT id, username, display_name, bracket
            FROM users
            WHERE team_id = $1
            AND is_active
            AND deleted_at IS NULL
            ORDER BY created_at ASC
        "#,
    )
    .bind(team_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
