use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Team model mapped to the teams table.
///
/// `bracket` pins the team to a bracket; when unset, the gate falls back to
/// the joining user's bracket. The invite code is stored hashed only.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub bracket: Option<String>,
    pub captain_id: Uuid,

    #[serde(skip_serializing)]
    pub invite_code_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
