use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::users::User;

/// Request payload for registering an account.
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub password: String,
    pub bracket: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("display_name", &self.display_name)
            .field("password", &"***")
            .field("bracket", &self.bracket)
            .finish()
    }
}

/// Request payload for logging in.
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// User payload returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub bracket: Option<String>,
    pub team_id: Option<Uuid>,
}

/// Response payload for login and registration.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            display_name: user.display_name,
            bracket: user.bracket,
            team_id: user.team_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_login_password() {
        let req = LoginRequest {
            email: "test@example.com".to_string(),
            password: "super-secret".to_string(),
        };
        let debug_output = format!("{:?}", req);
        assert!(debug_output.contains("***"));
        assert!(!debug_output.contains("super-secret"));
        assert!(debug_output.contains("test@example.com"));
    }

    #[test]
    fn debug_redacts_register_password() {
        let req = RegisterRequest {
            email: "test@example.com".to_string(),
            username: "tester".to_string(),
            display_name: None,
            password: "super-secret".to_string(),
            bracket: Some("Open".to_string()),
        };
        let debug_output = format!("{:?}", req);
        assert!(debug_output.contains("***"));
        assert!(!debug_output.contains("super-secret"));
    }
}
