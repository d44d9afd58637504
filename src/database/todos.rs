use super::{Rename, models::TodoModel};
use chrono::Utc;
use sqlx::{Error as SqlxError, sqlite::SqlitePool};

pub async fn find(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
) -> Result<Option<TodoModel>, SqlxError> {
    sqlx::query_as::<_, TodoModel>(
        "SELECT id, user_id, name, text, created_at FROM todos WHERE user_id = ? AND name = ?",
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// `None` when the user already has a TODO with that name
pub async fn insert(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    text: &str,
) -> Result<Option<TodoModel>, SqlxError> {
    let created_at = Utc::now().timestamp();

    let result = sqlx::query(
        r#"
        INSERT INTO todos (user_id, name, text, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id, name) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(text)
    .bind(created_at)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(TodoModel {
        id: result.last_insert_rowid(),
        user_id,
        name: name.to_string(),
        text: text.to_string(),
        created_at,
    }))
}

pub async fn rename(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    new_name: &str,
) -> Result<Rename, SqlxError> {
    let result = sqlx::query("UPDATE todos SET name = ? WHERE user_id = ? AND name = ?")
        .bind(new_name)
        .bind(user_id)
        .bind(name)
        .execute(pool)
        .await;

    Rename::from_update(result)
}

pub async fn update_text(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    text: &str,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("UPDATE todos SET text = ? WHERE user_id = ? AND name = ?")
        .bind(text)
        .bind(user_id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete(pool: &SqlitePool, user_id: i64, name: &str) -> Result<u64, SqlxError> {
    let result = sqlx::query("DELETE FROM todos WHERE user_id = ? AND name = ?")
        .bind(user_id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Lists the user's TODO names, oldest first
pub async fn list_names(pool: &SqlitePool, user_id: i64) -> Result<Vec<String>, SqlxError> {
    sqlx::query_scalar::<_, String>("SELECT name FROM todos WHERE user_id = ? ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;

    #[tokio::test]
    async fn todo_lifecycle() {
        let pool = memory_pool().await;
        insert(&pool, 7, "groceries", "milk").await.unwrap();
        insert(&pool, 7, "chores", "dishes").await.unwrap();
        insert(&pool, 8, "groceries", "eggs").await.unwrap();

        assert_eq!(
            list_names(&pool, 7).await.unwrap(),
            vec!["groceries".to_string(), "chores".to_string()]
        );

        assert_eq!(update_text(&pool, 7, "groceries", "bread").await.unwrap(), 1);
        assert_eq!(find(&pool, 7, "groceries").await.unwrap().unwrap().text, "bread");
        assert_eq!(find(&pool, 8, "groceries").await.unwrap().unwrap().text, "eggs");

        assert_eq!(rename(&pool, 7, "chores", "cleaning").await.unwrap(), Rename::Done);
        assert!(find(&pool, 7, "chores").await.unwrap().is_none());

        assert_eq!(delete(&pool, 7, "cleaning").await.unwrap(), 1);
        assert_eq!(list_names(&pool, 7).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_todo_updates_nothing() {
        let pool = memory_pool().await;
        assert_eq!(update_text(&pool, 1, "ghost", "boo").await.unwrap(), 0);
        assert_eq!(rename(&pool, 1, "ghost", "spirit").await.unwrap(), Rename::NotFound);
    }

    #[tokio::test]
    async fn names_stay_unique_per_user() {
        let pool = memory_pool().await;
        assert!(insert(&pool, 7, "groceries", "milk").await.unwrap().is_some());
        assert!(insert(&pool, 7, "groceries", "eggs").await.unwrap().is_none());
        assert_eq!(find(&pool, 7, "groceries").await.unwrap().unwrap().text, "milk");

        insert(&pool, 7, "chores", "dishes").await.unwrap();
        assert_eq!(rename(&pool, 7, "chores", "groceries").await.unwrap(), Rename::NameTaken);
        assert!(find(&pool, 7, "chores").await.unwrap().is_some());
    }
}
