use super::models::BanModel;
use chrono::Utc;
use sqlx::{Error as SqlxError, sqlite::SqlitePool};

/// Which parts of the bot a ban covers
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BanScope {
    pub command: bool,
    pub chat: bool,
    pub global: bool,
}

impl Default for BanScope {
    fn default() -> Self {
        Self {
            command: true,
            chat: true,
            global: true,
        }
    }
}

/// Finds a ban entry by Discord ID, if it exists
pub async fn find_by_user_id(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Option<BanModel>, SqlxError> {
    sqlx::query_as::<_, BanModel>(
        r#"
        SELECT user_id, command, chat, global, reason, moderator_id, created_at
        FROM bans
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Creates or replaces the ban of a user
pub async fn upsert(
    pool: &SqlitePool,
    user_id: i64,
    moderator_id: i64,
    scope: BanScope,
    reason: &str,
) -> Result<BanModel, SqlxError> {
    let created_at = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO bans (user_id, command, chat, global, reason, moderator_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            command = excluded.command,
            chat = excluded.chat,
            global = excluded.global,
            reason = excluded.reason,
            moderator_id = excluded.moderator_id,
            created_at = excluded.created_at
        "#,
    )
    .bind(user_id)
    .bind(scope.command)
    .bind(scope.chat)
    .bind(scope.global)
    .bind(reason)
    .bind(moderator_id)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(BanModel {
        user_id,
        command: scope.command,
        chat: scope.chat,
        global: scope.global,
        reason: reason.to_string(),
        moderator_id,
        created_at,
    })
}

/// Lifts a ban. Returns the number of affected rows
pub async fn delete_by_user_id(pool: &SqlitePool, user_id: i64) -> Result<u64, SqlxError> {
    let result = sqlx::query("DELETE FROM bans WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;

    #[tokio::test]
    async fn ban_is_replaced_not_duplicated() {
        let pool = memory_pool().await;
        upsert(&pool, 5, 1, BanScope::default(), "spam").await.unwrap();
        let scope = BanScope {
            command: false,
            chat: true,
            global: false,
        };
        upsert(&pool, 5, 2, scope, "chat abuse").await.unwrap();

        let ban = find_by_user_id(&pool, 5).await.unwrap().unwrap();
        assert!(!ban.command);
        assert!(ban.chat);
        assert_eq!(ban.reason, "chat abuse");
        assert_eq!(ban.moderator_id, 2);

        assert_eq!(delete_by_user_id(&pool, 5).await.unwrap(), 1);
        assert!(find_by_user_id(&pool, 5).await.unwrap().is_none());
    }
}
