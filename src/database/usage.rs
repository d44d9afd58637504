use sqlx::{Error as SqlxError, sqlite::SqlitePool};

/// Increments the invocation counter of a command
pub async fn increment(pool: &SqlitePool, command: &str) -> Result<(), SqlxError> {
    sqlx::query(
        r#"
        INSERT INTO command_usage (command, count) VALUES (?, 1)
        ON CONFLICT(command) DO UPDATE SET count = count + 1
        "#,
    )
    .bind(command)
    .execute(pool)
    .await?;
    Ok(())
}

/// Most used commands, highest count first
pub async fn top(pool: &SqlitePool, limit: i64) -> Result<Vec<(String, i64)>, SqlxError> {
    sqlx::query_as::<_, (String, i64)>(
        "SELECT command, count FROM command_usage ORDER BY count DESC, command LIMIT ?",
    )
    .bind(limit.clamp(1, 100))
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;

    #[tokio::test]
    async fn counts_are_upserted() {
        let pool = memory_pool().await;
        increment(&pool, "tag show").await.unwrap();
        increment(&pool, "8ball").await.unwrap();
        increment(&pool, "tag show").await.unwrap();

        let top = top(&pool, 10).await.unwrap();
        assert_eq!(
            top,
            vec![("tag show".to_string(), 2), ("8ball".to_string(), 1)]
        );
    }
}
