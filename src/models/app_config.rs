//! App config model
//!
//! Key/value store for publicly readable app settings (ad frequency, free
//! tier limits, feature toggles). Values are free-form JSON.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// One app config entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_by: Option<String>,
    pub updated_at: String,
}

impl AppConfig {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let value_json: String = row.get("value")?;
        let value: serde_json::Value = serde_json::from_str(&value_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        Ok(Self {
            key: row.get("key")?,
            value,
            updated_by: row.get("updated_by")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// List every config entry
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM app_config ORDER BY key")?;
        let entries = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Get one config entry by key
    pub fn get(conn: &Connection, key: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM app_config WHERE key = ?1")?;

        let result = stmt.query_row([key], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert or replace a config entry
    pub fn set(
        conn: &Connection,
        key: &str,
        value: &serde_json::Value,
        updated_by: Option<&str>,
    ) -> DbResult<Self> {
        let value_json = serde_json::to_string(value)?;
        conn.execute(
            r#"
            INSERT INTO app_config (key, value, updated_by, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_by = excluded.updated_by,
                updated_at = datetime('now')
            "#,
            params![key, value_json, updated_by],
        )?;

        Self::get(conn, key)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}
