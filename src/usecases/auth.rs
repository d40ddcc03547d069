use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::jwt::{JwtConfig, hash_password, verify_password},
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    error::AppError,
    models::brackets::Bracket,
    repositories::users as user_repo,
};

/// Business logic for accounts and sessions.
pub struct AuthService;

impl AuthService {
    /// Registers an account and returns a session token.
    pub async fn register(
        pool: &PgPool,
        jwt_config: &JwtConfig,
        req: RegisterRequest,
    ) -> Result<LoginResponse, AppError> {
        let email = req.email.trim().to_string();
        if !email.contains('@') {
            return Err(AppError::ValidationError(
                "A valid email address is required".to_string(),
            ));
        }

        let username = req.username.trim().to_string();
        if !is_valid_username(&username) {
            return Err(AppError::ValidationError(
                "Username must be 3-32 characters, digits, underscores, or hyphens".to_string(),
            ));
        }

        if req.password.chars().count() < 8 {
            return Err(AppError::ValidationError(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        // Bracket self-assignment is optional, but when provided it must be a
        // known bracket so the gate never sees a garbage value later.
        let bracket = match req.bracket.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(Bracket::parse(raw).ok_or_else(|| {
                AppError::ValidationError(format!("Unrecognized bracket '{}'", raw))
            })?),
            None => None,
        };

        if user_repo::email_exists(pool, &email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        if user_repo::username_exists(pool, &username).await? {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let password_hash = hash_password(&req.password)
            .map_err(|err| AppError::Internal(format!("password hashing failed: {}", err)))?;
        let display_name = req
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(&username)
            .to_string();

        let user = user_repo::insert_user(
            pool,
            &email,
            &username,
            &display_name,
            &password_hash,
            bracket.map(Bracket::as_str),
        )
        .await?;

        tracing::info!(user = %user.username, bracket = ?user.bracket, "User registered");

        let token = jwt_config
            .create_token(user.id, user.email.clone())
            .map_err(|err| AppError::Internal(format!("token creation failed: {}", err)))?;

        Ok(LoginResponse {
            token,
            user: UserResponse::from(user),
        })
    }

    /// Verifies credentials and returns a session token.
    pub async fn login(
        pool: &PgPool,
        jwt_config: &JwtConfig,
        req: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let user = user_repo::find_user_by_email(pool, req.email.trim())
            .await?
            .ok_or_else(invalid)?;

        let stored_hash = user.password_hash.as_deref().ok_or_else(invalid)?;
        let verified = verify_password(&req.password, stored_hash)
            .map_err(|err| AppError::Internal(format!("password verification failed: {}", err)))?;
        if !verified {
            return Err(invalid());
        }

        let token = jwt_config
            .create_token(user.id, user.email.clone())
            .map_err(|err| AppError::Internal(format!("token creation failed: {}", err)))?;

        Ok(LoginResponse {
            token,
            user: UserResponse::from(user),
        })
    }

    /// Returns the current user's profile.
    pub async fn me(pool: &PgPool, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = user_repo::find_user_by_id(pool, user_id)
            .await?
            .ok_or(AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }
}

fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return false;
    }

    username
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::is_valid_username;

    #[test]
    fn username_validation_allows_expected_format() {
        assert!(is_valid_username("team-captain_1"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username("dots.not.allowed"));
    }
}
