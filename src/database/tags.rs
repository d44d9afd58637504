use super::{Rename, models::TagModel};
use chrono::Utc;
use sqlx::{Error as SqlxError, sqlite::SqlitePool};

const TAG_COLUMNS: &str = "id, guild_id, name, text, owner_id, nsfw, uses, created_at";

/// Finds a tag by name inside a guild
pub async fn find(
    pool: &SqlitePool,
    guild_id: i64,
    name: &str,
) -> Result<Option<TagModel>, SqlxError> {
    sqlx::query_as::<_, TagModel>(&format!(
        "SELECT {TAG_COLUMNS} FROM tags WHERE guild_id = ? AND name = ?"
    ))
    .bind(guild_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// Creates a new tag and returns the stored model, or `None` when the guild
/// already has a tag with that name
pub async fn insert(
    pool: &SqlitePool,
    guild_id: i64,
    name: &str,
    text: &str,
    owner_id: i64,
    nsfw: bool,
) -> Result<Option<TagModel>, SqlxError> {
    let created_at = Utc::now().timestamp();

    let result = sqlx::query(
        r#"
        INSERT INTO tags (guild_id, name, text, owner_id, nsfw, uses, created_at)
        VALUES (?, ?, ?, ?, ?, 0, ?)
        ON CONFLICT(guild_id, name) DO NOTHING
        "#,
    )
    .bind(guild_id)
    .bind(name)
    .bind(text)
    .bind(owner_id)
    .bind(nsfw)
    .bind(created_at)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(TagModel {
        id: result.last_insert_rowid(),
        guild_id,
        name: name.to_string(),
        text: text.to_string(),
        owner_id,
        nsfw,
        uses: 0,
        created_at,
    }))
}

/// Removes a tag. Returns the number of affected rows
pub async fn delete(pool: &SqlitePool, guild_id: i64, name: &str) -> Result<u64, SqlxError> {
    let result = sqlx::query("DELETE FROM tags WHERE guild_id = ? AND name = ?")
        .bind(guild_id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn rename(
    pool: &SqlitePool,
    guild_id: i64,
    name: &str,
    new_name: &str,
) -> Result<Rename, SqlxError> {
    let result = sqlx::query("UPDATE tags SET name = ? WHERE guild_id = ? AND name = ?")
        .bind(new_name)
        .bind(guild_id)
        .bind(name)
        .execute(pool)
        .await;

    Rename::from_update(result)
}

pub async fn update_text(
    pool: &SqlitePool,
    guild_id: i64,
    name: &str,
    text: &str,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("UPDATE tags SET text = ? WHERE guild_id = ? AND name = ?")
        .bind(text)
        .bind(guild_id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn set_owner(
    pool: &SqlitePool,
    guild_id: i64,
    name: &str,
    owner_id: i64,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("UPDATE tags SET owner_id = ? WHERE guild_id = ? AND name = ?")
        .bind(owner_id)
        .bind(guild_id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn set_nsfw(
    pool: &SqlitePool,
    guild_id: i64,
    name: &str,
    nsfw: bool,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("UPDATE tags SET nsfw = ? WHERE guild_id = ? AND name = ?")
        .bind(nsfw)
        .bind(guild_id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Bumps the usage counter of a tag
pub async fn increment_uses(pool: &SqlitePool, guild_id: i64, name: &str) -> Result<(), SqlxError> {
    sqlx::query("UPDATE tags SET uses = uses + 1 WHERE guild_id = ? AND name = ?")
        .bind(guild_id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(())
}

/// Lists every tag name of a guild in creation order
pub async fn list_names(pool: &SqlitePool, guild_id: i64) -> Result<Vec<String>, SqlxError> {
    sqlx::query_scalar::<_, String>("SELECT name FROM tags WHERE guild_id = ? ORDER BY id")
        .bind(guild_id)
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;

    #[tokio::test]
    async fn tags_are_scoped_per_guild() {
        let pool = memory_pool().await;
        insert(&pool, 1, "rules", "be nice", 10, false).await.unwrap();

        assert!(find(&pool, 1, "rules").await.unwrap().is_some());
        assert!(find(&pool, 2, "rules").await.unwrap().is_none());

        insert(&pool, 2, "rules", "other guild", 11, true).await.unwrap();
        let other = find(&pool, 2, "rules").await.unwrap().unwrap();
        assert_eq!(other.text, "other guild");
        assert!(other.nsfw);
    }

    #[tokio::test]
    async fn second_tag_with_the_same_name_is_not_stored() {
        let pool = memory_pool().await;
        assert!(insert(&pool, 1, "faq", "a", 10, false).await.unwrap().is_some());
        assert!(insert(&pool, 1, "faq", "b", 11, false).await.unwrap().is_none());

        let tag = find(&pool, 1, "faq").await.unwrap().unwrap();
        assert_eq!(tag.text, "a");
        assert_eq!(tag.owner_id, 10);
    }

    #[tokio::test]
    async fn rename_onto_an_existing_tag_is_refused() {
        let pool = memory_pool().await;
        insert(&pool, 1, "faq", "a", 10, false).await.unwrap();
        insert(&pool, 1, "rules", "b", 10, false).await.unwrap();

        assert_eq!(rename(&pool, 1, "faq", "rules").await.unwrap(), Rename::NameTaken);
        assert_eq!(rename(&pool, 1, "ghost", "spooky").await.unwrap(), Rename::NotFound);
        assert_eq!(find(&pool, 1, "rules").await.unwrap().unwrap().text, "b");
    }

    #[tokio::test]
    async fn edits_and_counters() {
        let pool = memory_pool().await;
        insert(&pool, 1, "faq", "old", 10, false).await.unwrap();

        assert_eq!(update_text(&pool, 1, "faq", "new").await.unwrap(), 1);
        assert_eq!(set_owner(&pool, 1, "faq", 20).await.unwrap(), 1);
        assert_eq!(set_nsfw(&pool, 1, "faq", true).await.unwrap(), 1);
        increment_uses(&pool, 1, "faq").await.unwrap();
        increment_uses(&pool, 1, "faq").await.unwrap();

        let tag = find(&pool, 1, "faq").await.unwrap().unwrap();
        assert_eq!(tag.text, "new");
        assert_eq!(tag.owner_id, 20);
        assert!(tag.nsfw);
        assert_eq!(tag.uses, 2);

        assert_eq!(rename(&pool, 1, "faq", "help").await.unwrap(), Rename::Done);
        assert!(find(&pool, 1, "faq").await.unwrap().is_none());
        assert_eq!(list_names(&pool, 1).await.unwrap(), vec!["help".to_string()]);

        assert_eq!(delete(&pool, 1, "help").await.unwrap(), 1);
        assert_eq!(delete(&pool, 1, "help").await.unwrap(), 0);
    }
}
