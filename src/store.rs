use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::{Row, SqlitePool};
use tracing::warn;

use crate::db;

pub const KEY_PLAN: &str = "training_plan";
pub const KEY_MEALS: &str = "meals";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_MEASUREMENTS: &str = "body_measurements";
pub const KEY_WORKOUT: &str = "workout_session";

/// Keyed durable store backed by a single SQLite table. Values are JSON
/// blobs; each key is independent (no cross-key transactions).
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn open(path: &str) -> Result<Self> {
        let pool = db::open(path).await?;
        Self::init(pool).await
    }

    /// Single-connection in-memory store, used by tests. SQLite gives every
    /// connection its own private `:memory:` database, so the pool must not
    /// grow past one connection.
    pub async fn open_in_memory() -> Result<Self> {
        use std::str::FromStr;

        let opts = sqlx::sqlite::SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;
        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS app_state (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Read and decode the value at `key`. A missing key and a malformed
    /// stored value both come back as `None`; malformed values are logged and
    /// left for the next write to replace.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let row = sqlx::query("SELECT value FROM app_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row.get("value");
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "discarding malformed stored value");
                Ok(None)
            }
        }
    }

    pub async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        sqlx::query(
            "INSERT INTO app_state (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(raw)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM app_state WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Raw string at `key`, bypassing decoding. Used by tests to inspect what
    /// actually got persisted.
    pub async fn read_raw(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM app_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Store a raw string at `key` without encoding. Lets tests plant
    /// malformed values.
    pub async fn write_raw(&self, key: &str, raw: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO app_state (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(raw)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
