//! Custom exercise model
//!
//! User-defined exercises beyond the built-in catalog. Ids are assigned by
//! the client in the `custom_<timestamp>` shape so they never collide with
//! catalog exercise ids.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A user-defined exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomExercise {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub muscle: String,
}

/// Data for creating a custom exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomExerciseCreate {
    pub id: String,
    pub name: String,
    pub muscle: String,
}

/// Data for updating a custom exercise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomExerciseUpdate {
    pub name: Option<String>,
    pub muscle: Option<String>,
}

impl CustomExercise {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            muscle: row.get("muscle")?,
        })
    }

    /// Create a new custom exercise
    pub fn create(conn: &Connection, user_id: &str, data: &CustomExerciseCreate) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO custom_exercises (id, user_id, name, muscle) VALUES (?1, ?2, ?3, ?4)",
            params![data.id, user_id, data.name, data.muscle],
        )?;

        Self::get_by_id(conn, &data.id, user_id)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a custom exercise by id, scoped to its owner
    pub fn get_by_id(conn: &Connection, id: &str, user_id: &str) -> DbResult<Option<Self>> {
        let mut stmt =
            conn.prepare("SELECT * FROM custom_exercises WHERE id = ?1 AND user_id = ?2")?;

        let result = stmt.query_row([id, user_id], Self::from_row);
        match result {
            Ok(exercise) => Ok(Some(exercise)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's custom exercises
    pub fn list_for_user(conn: &Connection, user_id: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM custom_exercises WHERE user_id = ?1")?;
        let exercises = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(exercises)
    }

    /// Update a custom exercise's provided fields
    pub fn update(
        conn: &Connection,
        id: &str,
        user_id: &str,
        data: &CustomExerciseUpdate,
    ) -> DbResult<Option<Self>> {
        let current = match Self::get_by_id(conn, id, user_id)? {
            Some(e) => e,
            None => return Ok(None),
        };

        let name = data.name.clone().unwrap_or(current.name);
        let muscle = data.muscle.clone().unwrap_or(current.muscle);

        conn.execute(
            "UPDATE custom_exercises SET name = ?1, muscle = ?2 WHERE id = ?3 AND user_id = ?4",
            params![name, muscle, id, user_id],
        )?;

        Self::get_by_id(conn, id, user_id)
    }

    /// Delete a custom exercise, scoped to its owner
    pub fn delete(conn: &Connection, id: &str, user_id: &str) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM custom_exercises WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )?;
        Ok(rows > 0)
    }
}
