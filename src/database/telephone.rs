use super::models::TelephoneLineModel;
use sqlx::{Error as SqlxError, sqlite::SqlitePool};

pub async fn find_line(
    pool: &SqlitePool,
    guild_id: i64,
) -> Result<Option<TelephoneLineModel>, SqlxError> {
    sqlx::query_as::<_, TelephoneLineModel>(
        r#"
        SELECT guild_id, channel_id, ping_role_id, member_ping_id, is_line_busy
        FROM telephone_lines
        WHERE guild_id = ?
        "#,
    )
    .bind(guild_id)
    .fetch_optional(pool)
    .await
}

/// Creates the guild's line or moves it to another channel. Moving a line
/// also frees it.
pub async fn upsert_channel(
    pool: &SqlitePool,
    guild_id: i64,
    channel_id: i64,
) -> Result<(), SqlxError> {
    sqlx::query(
        r#"
        INSERT INTO telephone_lines (guild_id, channel_id, is_line_busy)
        VALUES (?, ?, 0)
        ON CONFLICT(guild_id) DO UPDATE
        SET channel_id = excluded.channel_id, is_line_busy = 0
        "#,
    )
    .bind(guild_id)
    .bind(channel_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_ping_role(
    pool: &SqlitePool,
    guild_id: i64,
    role_id: Option<i64>,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("UPDATE telephone_lines SET ping_role_id = ? WHERE guild_id = ?")
        .bind(role_id)
        .bind(guild_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_member_ping(
    pool: &SqlitePool,
    guild_id: i64,
    member_id: Option<i64>,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("UPDATE telephone_lines SET member_ping_id = ? WHERE guild_id = ?")
        .bind(member_id)
        .bind(guild_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Marks both lines busy in one transaction, only if neither is busy yet.
/// Returns `false` when one of them was already taken.
pub async fn reserve_pair(pool: &SqlitePool, caller: i64, callee: i64) -> Result<bool, SqlxError> {
    let mut tx = pool.begin().await?;

    let busy: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM telephone_lines WHERE guild_id IN (?, ?) AND is_line_busy = 1",
    )
    .bind(caller)
    .bind(callee)
    .fetch_one(&mut *tx)
    .await?;

    if busy > 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::query("UPDATE telephone_lines SET is_line_busy = 1 WHERE guild_id IN (?, ?)")
        .bind(caller)
        .bind(callee)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

pub async fn release_pair(pool: &SqlitePool, caller: i64, callee: i64) -> Result<(), SqlxError> {
    sqlx::query("UPDATE telephone_lines SET is_line_busy = 0 WHERE guild_id IN (?, ?)")
        .bind(caller)
        .bind(callee)
        .execute(pool)
        .await?;
    Ok(())
}

/// Frees every line. No call survives a restart, so any busy flag found at
/// startup is stale.
pub async fn release_all(pool: &SqlitePool) -> Result<u64, SqlxError> {
    let result = sqlx::query("UPDATE telephone_lines SET is_line_busy = 0 WHERE is_line_busy = 1")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn block(pool: &SqlitePool, guild_id: i64, blocked: i64) -> Result<bool, SqlxError> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO telephone_blocks (guild_id, blocked_guild_id) VALUES (?, ?)",
    )
    .bind(guild_id)
    .bind(blocked)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn unblock(pool: &SqlitePool, guild_id: i64, blocked: i64) -> Result<bool, SqlxError> {
    let result =
        sqlx::query("DELETE FROM telephone_blocks WHERE guild_id = ? AND blocked_guild_id = ?")
            .bind(guild_id)
            .bind(blocked)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn blocked_guilds(pool: &SqlitePool, guild_id: i64) -> Result<Vec<i64>, SqlxError> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT blocked_guild_id FROM telephone_blocks
        WHERE guild_id = ?
        ORDER BY blocked_guild_id
        "#,
    )
    .bind(guild_id)
    .fetch_all(pool)
    .await
}

/// True when either guild has blocked the other
pub async fn is_blocked_between(pool: &SqlitePool, a: i64, b: i64) -> Result<bool, SqlxError> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM telephone_blocks
        WHERE (guild_id = ? AND blocked_guild_id = ?)
           OR (guild_id = ? AND blocked_guild_id = ?)
        "#,
    )
    .bind(a)
    .bind(b)
    .bind(b)
    .bind(a)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;

    #[tokio::test]
    async fn setup_moves_channel_without_touching_pings() {
        let pool = memory_pool().await;
        upsert_channel(&pool, 1, 100).await.unwrap();
        set_ping_role(&pool, 1, Some(55)).await.unwrap();
        upsert_channel(&pool, 1, 200).await.unwrap();

        let line = find_line(&pool, 1).await.unwrap().unwrap();
        assert_eq!(line.channel_id, 200);
        assert_eq!(line.ping_role_id, Some(55));
        assert!(!line.is_line_busy);
    }

    #[tokio::test]
    async fn pair_reservation_is_exclusive() {
        let pool = memory_pool().await;
        upsert_channel(&pool, 1, 100).await.unwrap();
        upsert_channel(&pool, 2, 200).await.unwrap();
        upsert_channel(&pool, 3, 300).await.unwrap();

        assert!(reserve_pair(&pool, 1, 2).await.unwrap());
        assert!(!reserve_pair(&pool, 3, 2).await.unwrap());
        assert!(!find_line(&pool, 3).await.unwrap().unwrap().is_line_busy);

        release_pair(&pool, 1, 2).await.unwrap();
        assert!(reserve_pair(&pool, 3, 2).await.unwrap());
    }

    #[tokio::test]
    async fn setup_frees_a_stuck_line() {
        let pool = memory_pool().await;
        upsert_channel(&pool, 1, 100).await.unwrap();
        upsert_channel(&pool, 2, 200).await.unwrap();
        assert!(reserve_pair(&pool, 1, 2).await.unwrap());

        upsert_channel(&pool, 2, 250).await.unwrap();
        assert!(!find_line(&pool, 2).await.unwrap().unwrap().is_line_busy);
    }

    #[tokio::test]
    async fn release_all_frees_every_busy_line() {
        let pool = memory_pool().await;
        for guild in 1..=4 {
            upsert_channel(&pool, guild, guild * 100).await.unwrap();
        }
        assert!(reserve_pair(&pool, 1, 2).await.unwrap());
        assert!(reserve_pair(&pool, 3, 4).await.unwrap());

        assert_eq!(release_all(&pool).await.unwrap(), 4);
        assert_eq!(release_all(&pool).await.unwrap(), 0);
        assert!(reserve_pair(&pool, 2, 3).await.unwrap());
    }

    #[tokio::test]
    async fn blocks_apply_in_both_directions() {
        let pool = memory_pool().await;
        assert!(block(&pool, 1, 2).await.unwrap());
        assert!(!block(&pool, 1, 2).await.unwrap());

        assert!(is_blocked_between(&pool, 1, 2).await.unwrap());
        assert!(is_blocked_between(&pool, 2, 1).await.unwrap());
        assert!(!is_blocked_between(&pool, 1, 3).await.unwrap());
        assert_eq!(blocked_guilds(&pool, 1).await.unwrap(), vec![2]);

        assert!(unblock(&pool, 1, 2).await.unwrap());
        assert!(!is_blocked_between(&pool, 2, 1).await.unwrap());
    }
}
