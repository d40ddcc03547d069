use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::settings::{PlatformMode, USER_MODE_KEY},
    repositories::settings as settings_repo,
};

#[derive(Debug, Clone)]
struct CachedSetting {
    value: Option<String>,
    fetched_at: Instant,
}

/// Read-through cache over the platform settings table.
///
/// The gate consults `user_mode` on every team-mutation request, so reads go
/// through a short TTL cache instead of hitting the database each time.
#[derive(Clone)]
pub struct SettingsCache {
    entries: Arc<DashMap<String, CachedSetting>>,
    ttl: Duration,
}

impl SettingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn from_env() -> Self {
        let ttl_secs = std::env::var("SETTINGS_CACHE_TTL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(5);
        Self::new(Duration::from_secs(ttl_secs))
    }

    pub async fn get(&self, pool: &PgPool, key: &str) -> Result<Option<String>, AppError> {
        if let Some(entry) = self.entries.get(key) {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(entry.value.clone());
            }
        }

        let value = settings_repo::get_setting(pool, key).await?;
        self.entries.insert(
            key.to_string(),
            CachedSetting {
                value: value.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(value)
    }

    pub async fn platform_mode(&self, pool: &PgPool) -> Result<PlatformMode, AppError> {
        let value = self.get(pool, USER_MODE_KEY).await?;
        Ok(PlatformMode::from_setting(value.as_deref()))
    }
}
