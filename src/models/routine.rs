//! Routine model
//!
//! Named, ordered exercise lists. Free-tier users are limited to a fixed
//! number of routines; the limit is enforced in the service layer.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DbResult;

/// A workout routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub exercises: Vec<String>,
    pub position: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new routine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineCreate {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub position: i64,
}

/// Data for updating a routine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutineUpdate {
    pub name: Option<String>,
    pub exercises: Option<Vec<String>>,
    pub position: Option<i64>,
}

impl Routine {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let exercises_json: String = row.get("exercises")?;
        let exercises: Vec<String> = serde_json::from_str(&exercises_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            exercises,
            position: row.get("position")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Create a new routine
    pub fn create(conn: &Connection, user_id: &str, data: &RoutineCreate) -> DbResult<Self> {
        let id = Uuid::new_v4().to_string();
        let exercises_json = serde_json::to_string(&data.exercises)?;

        conn.execute(
            r#"
            INSERT INTO routines (id, user_id, name, exercises, position)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![id, user_id, data.name, exercises_json, data.position],
        )?;

        Self::get_by_id(conn, &id, user_id)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a routine by id, scoped to its owner
    pub fn get_by_id(conn: &Connection, id: &str, user_id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM routines WHERE id = ?1 AND user_id = ?2")?;

        let result = stmt.query_row([id, user_id], Self::from_row);
        match result {
            Ok(routine) => Ok(Some(routine)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's routines by position, then creation time
    pub fn list_for_user(conn: &Connection, user_id: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM routines WHERE user_id = ?1 ORDER BY position, created_at",
        )?;
        let routines = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(routines)
    }

    /// Count a user's routines (free-tier limit check)
    pub fn count_for_user(conn: &Connection, user_id: &str) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM routines WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Update a routine's provided fields
    pub fn update(
        conn: &Connection,
        id: &str,
        user_id: &str,
        data: &RoutineUpdate,
    ) -> DbResult<Option<Self>> {
        let current = match Self::get_by_id(conn, id, user_id)? {
            Some(r) => r,
            None => return Ok(None),
        };

        let name = data.name.clone().unwrap_or(current.name);
        let exercises = data.exercises.clone().unwrap_or(current.exercises);
        let position = data.position.unwrap_or(current.position);
        let exercises_json = serde_json::to_string(&exercises)?;

        conn.execute(
            r#"
            UPDATE routines
            SET name = ?1,
                exercises = ?2,
                position = ?3,
                updated_at = datetime('now')
            WHERE id = ?4 AND user_id = ?5
            "#,
            params![name, exercises_json, position, id, user_id],
        )?;

        Self::get_by_id(conn, id, user_id)
    }

    /// Delete a routine, scoped to its owner
    pub fn delete(conn: &Connection, id: &str, user_id: &str) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM routines WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )?;
        Ok(rows > 0)
    }
}
