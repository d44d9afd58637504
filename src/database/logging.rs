use sqlx::{Error as SqlxError, sqlite::SqlitePool};

/// Webhook URL that receives configuration command logs for a guild
pub async fn config_webhook(pool: &SqlitePool, guild_id: i64) -> Result<Option<String>, SqlxError> {
    sqlx::query_scalar::<_, String>(
        "SELECT on_config_commands FROM logging_webhooks WHERE guild_id = ?",
    )
    .bind(guild_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_config_webhook(
    pool: &SqlitePool,
    guild_id: i64,
    url: &str,
) -> Result<(), SqlxError> {
    sqlx::query(
        r#"
        INSERT INTO logging_webhooks (guild_id, on_config_commands) VALUES (?, ?)
        ON CONFLICT(guild_id) DO UPDATE SET on_config_commands = excluded.on_config_commands
        "#,
    )
    .bind(guild_id)
    .bind(url)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn remove_config_webhook(pool: &SqlitePool, guild_id: i64) -> Result<u64, SqlxError> {
    let result = sqlx::query("DELETE FROM logging_webhooks WHERE guild_id = ?")
        .bind(guild_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;

    #[tokio::test]
    async fn webhook_roundtrip() {
        let pool = memory_pool().await;
        assert!(config_webhook(&pool, 1).await.unwrap().is_none());

        set_config_webhook(&pool, 1, "https://discord.com/api/webhooks/1/a").await.unwrap();
        set_config_webhook(&pool, 1, "https://discord.com/api/webhooks/1/b").await.unwrap();
        assert_eq!(
            config_webhook(&pool, 1).await.unwrap().as_deref(),
            Some("https://discord.com/api/webhooks/1/b")
        );

        assert_eq!(remove_config_webhook(&pool, 1).await.unwrap(), 1);
        assert!(config_webhook(&pool, 1).await.unwrap().is_none());
    }
}
