//! Guild row bootstrap repository.
//!
//! The configuration engine never creates rows; a guild's record must
//! exist before a session can read it. Feature commands call `ensure`
//! before starting a session so the first configuration attempt in a
//! guild does not fail with a missing record.

use chrono::Utc;
use sqlx::Row;
use steward_types::error::StoreError;
use steward_types::ids::GuildId;

use super::pool::DatabasePool;

/// SQLite repository for guild record lifecycle.
pub struct SqliteGuildRepository {
    pool: DatabasePool,
}

impl SqliteGuildRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Insert the guild's configuration record if it does not exist.
    /// Existing records are left untouched.
    pub async fn ensure(&self, guild_id: &GuildId) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"INSERT INTO guild (guild_id, created_at, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT (guild_id) DO NOTHING"#,
        )
        .bind(guild_id.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    /// Whether a configuration record exists for the guild.
    pub async fn exists(&self, guild_id: &GuildId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM guild WHERE guild_id = ?")
            .bind(guild_id.as_str())
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("n")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(count > 0)
    }
}
