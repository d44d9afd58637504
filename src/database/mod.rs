pub mod bans;
pub mod logging;
pub mod models;
pub mod tags;
pub mod telephone;
pub mod todos;
pub mod usage;

use crate::env;
use sqlx::{
    Error as SqlxError,
    sqlite::{SqlitePool, SqliteQueryResult},
};
use tracing::info;

/// Connects to the database and runs migrations
pub async fn connect() -> Result<SqlitePool, SqlxError> {
    let database_url = env::database_url()
        .map(|opt| opt.unwrap_or_else(|| env::DEFAULT_DATABASE_URL.to_string()))
        .map_err(|err| SqlxError::Configuration(err.to_string().into()))?;

    let pool = SqlitePool::connect(&database_url).await?;
    prepare(&pool).await?;

    Ok(pool)
}

/// Runs migrations and clears state that cannot outlive the process
async fn prepare(pool: &SqlitePool) -> Result<(), SqlxError> {
    sqlx::migrate!("./migrations").run(pool).await?;

    let released = telephone::release_all(pool).await?;
    if released > 0 {
        info!("Released {released} telephone lines left busy by the last run");
    }

    Ok(())
}

pub use models::{BanModel, TagModel, TelephoneLineModel, TodoModel};

/// Result of renaming a row whose name is unique within its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rename {
    Done,
    NotFound,
    NameTaken,
}

impl Rename {
    fn from_update(result: Result<SqliteQueryResult, SqlxError>) -> Result<Self, SqlxError> {
        match result {
            Ok(done) if done.rows_affected() > 0 => Ok(Self::Done),
            Ok(_) => Ok(Self::NotFound),
            Err(SqlxError::Database(err)) if err.is_unique_violation() => Ok(Self::NameTaken),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

    /// In-memory database with the real migrations applied.
    ///
    /// A single connection keeps every query on the same in-memory database.
    pub async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::memory_pool;

    #[tokio::test]
    async fn startup_releases_lines_left_busy() {
        let pool = memory_pool().await;
        telephone::upsert_channel(&pool, 1, 100).await.unwrap();
        telephone::upsert_channel(&pool, 2, 200).await.unwrap();
        assert!(telephone::reserve_pair(&pool, 1, 2).await.unwrap());

        // Same database, next process
        prepare(&pool).await.unwrap();

        assert!(!telephone::find_line(&pool, 1).await.unwrap().unwrap().is_line_busy);
        assert!(telephone::reserve_pair(&pool, 2, 1).await.unwrap());
    }
}
