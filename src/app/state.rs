use sqlx::PgPool;
use tracing::warn;

use crate::{auth::jwt::JwtConfig, services::settings::SettingsCache};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub redis: Option<redis::Client>,
    pub settings: SettingsCache,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using insecure development secret");
            "insecure-dev-secret".to_string()
        });

        let redis = match std::env::var("REDIS_URL") {
            Ok(url) => match redis::Client::open(url) {
                Ok(client) => Some(client),
                Err(err) => {
                    warn!("Invalid REDIS_URL, rate limiting disabled: {}", err);
                    None
                }
            },
            Err(_) => {
                warn!("REDIS_URL not set, rate limiting disabled");
                None
            }
        };

        Self {
            db,
            jwt_config: JwtConfig::from_env(secret),
            redis,
            settings: SettingsCache::from_env(),
        }
    }
}
