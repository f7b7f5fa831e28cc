//! Session model
//!
//! A session is one completed workout: timestamps, duration, and a log
//! mapping of exercise id to the sets performed. Sessions are immutable
//! once created; analytics only ever reads them.

use std::collections::BTreeMap;

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DbResult;

/// One logged set. Weight and reps are kept textual because clients may
/// store placeholders like "N/A" or "BW"; numeric coercion happens in the
/// analytics extractor, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub weight: String,
    pub reps: String,
    #[serde(rename = "isPR", skip_serializing_if = "Option::is_none")]
    pub is_pr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle: Option<String>,
}

/// Per-session log mapping: exercise id -> ordered set entries.
/// BTreeMap keeps iteration deterministic for identical input.
pub type LogMap = BTreeMap<String, Vec<SetEntry>>;

/// A completed workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub routine_id: Option<String>,
    pub routine_name: String,
    pub started_at: String,
    pub finished_at: String,
    pub duration_minutes: i64,
    pub logs: LogMap,
    pub created_at: String,
}

/// Data for creating a new session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreate {
    pub routine_id: Option<String>,
    pub routine_name: String,
    pub started_at: String,
    pub finished_at: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub logs: LogMap,
}

impl Session {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let logs_json: String = row.get("logs")?;
        let logs: LogMap = serde_json::from_str(&logs_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            routine_id: row.get("routine_id")?,
            routine_name: row.get("routine_name")?,
            started_at: row.get("started_at")?,
            finished_at: row.get("finished_at")?,
            duration_minutes: row.get("duration_minutes")?,
            logs,
            created_at: row.get("created_at")?,
        })
    }

    /// Create a new session for a user
    pub fn create(conn: &Connection, user_id: &str, data: &SessionCreate) -> DbResult<Self> {
        let id = Uuid::new_v4().to_string();
        let logs_json = serde_json::to_string(&data.logs)?;

        conn.execute(
            r#"
            INSERT INTO sessions
            (id, user_id, routine_id, routine_name, started_at, finished_at,
             duration_minutes, logs)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                id,
                user_id,
                data.routine_id,
                data.routine_name,
                data.started_at,
                data.finished_at,
                data.duration_minutes,
                logs_json,
            ],
        )?;

        Self::get_by_id(conn, &id, user_id)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a session by id, scoped to its owner
    pub fn get_by_id(conn: &Connection, id: &str, user_id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM sessions WHERE id = ?1 AND user_id = ?2")?;

        let result = stmt.query_row([id, user_id], Self::from_row);
        match result {
            Ok(session) => Ok(Some(session)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's sessions, newest first (history view)
    pub fn list_for_user(conn: &Connection, user_id: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM sessions WHERE user_id = ?1 ORDER BY finished_at DESC",
        )?;
        let sessions = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sessions)
    }

    /// List a user's sessions ascending by finish time (analytics input)
    pub fn list_chronological(conn: &Connection, user_id: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM sessions WHERE user_id = ?1 ORDER BY finished_at",
        )?;
        let sessions = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sessions)
    }

    /// Delete a session, scoped to its owner
    pub fn delete(conn: &Connection, id: &str, user_id: &str) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM sessions WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, Database};
    use crate::models::Profile;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn))
            .unwrap();
        db
    }

    fn sample_logs() -> LogMap {
        let mut logs = LogMap::new();
        logs.insert(
            "bench_press".to_string(),
            vec![
                SetEntry {
                    weight: "50".to_string(),
                    reps: "10".to_string(),
                    is_pr: Some(true),
                    muscle: Some("chest".to_string()),
                },
                SetEntry {
                    weight: "N/A".to_string(),
                    reps: "8".to_string(),
                    is_pr: None,
                    muscle: None,
                },
            ],
        );
        logs
    }

    #[test]
    fn test_set_entry_json_shape() {
        let entry = SetEntry {
            weight: "50".to_string(),
            reps: "10".to_string(),
            is_pr: Some(true),
            muscle: Some("chest".to_string()),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"isPR\":true"));

        // Absent optionals are omitted, matching client payloads
        let bare = SetEntry {
            weight: "50".to_string(),
            reps: "10".to_string(),
            is_pr: None,
            muscle: None,
        };
        let json = serde_json::to_string(&bare).unwrap();
        assert!(!json.contains("isPR"));
        assert!(!json.contains("muscle"));
    }

    #[test]
    fn test_logs_round_trip_through_db() {
        let db = test_db();
        db.with_conn(|conn| {
            Profile::get_or_create(conn, "user-1")?;
            let created = Session::create(
                conn,
                "user-1",
                &SessionCreate {
                    routine_id: None,
                    routine_name: "Push day".to_string(),
                    started_at: "2026-02-01T09:30:00".to_string(),
                    finished_at: "2026-02-01T10:00:00".to_string(),
                    duration_minutes: 30,
                    logs: sample_logs(),
                },
            )?;

            let fetched = Session::get_by_id(conn, &created.id, "user-1")?.unwrap();
            assert_eq!(fetched.logs, sample_logs());
            assert_eq!(fetched.duration_minutes, 30);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_list_ordering() {
        let db = test_db();
        db.with_conn(|conn| {
            Profile::get_or_create(conn, "user-1")?;
            for finished in ["2026-02-10T10:00:00", "2026-02-01T10:00:00", "2026-02-05T10:00:00"] {
                Session::create(
                    conn,
                    "user-1",
                    &SessionCreate {
                        routine_id: None,
                        routine_name: "Legs".to_string(),
                        started_at: finished.to_string(),
                        finished_at: finished.to_string(),
                        duration_minutes: 45,
                        logs: LogMap::new(),
                    },
                )?;
            }

            let newest_first = Session::list_for_user(conn, "user-1")?;
            assert_eq!(newest_first[0].finished_at, "2026-02-10T10:00:00");

            let chronological = Session::list_chronological(conn, "user-1")?;
            assert_eq!(chronological[0].finished_at, "2026-02-01T10:00:00");
            assert_eq!(chronological[2].finished_at, "2026-02-10T10:00:00");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_delete_is_owner_scoped() {
        let db = test_db();
        db.with_conn(|conn| {
            Profile::get_or_create(conn, "user-1")?;
            Profile::get_or_create(conn, "user-2")?;
            let session = Session::create(
                conn,
                "user-1",
                &SessionCreate {
                    routine_id: None,
                    routine_name: "Pull day".to_string(),
                    started_at: "2026-02-01T09:00:00".to_string(),
                    finished_at: "2026-02-01T10:00:00".to_string(),
                    duration_minutes: 60,
                    logs: LogMap::new(),
                },
            )?;

            assert!(!Session::delete(conn, &session.id, "user-2")?);
            assert!(Session::delete(conn, &session.id, "user-1")?);
            Ok(())
        })
        .unwrap();
    }
}
