use sqlx::PgPool;

use crate::error::AppError;

/// Returns the value of a platform setting row, if present.
pub async fn get_setting(pool: &PgPool, key: &str) -> Result<Option<String>, AppError> {
    let value = sqlx::query_scalar::<_, String>(
        r#"
            SELECT value
            FROM platform_settings
            WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(value)
}
