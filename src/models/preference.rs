//! User preference model
//!
//! One row per user, created with defaults on first read. The theme field
//! is premium-gated in the service layer; everything else is free.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// Visibility toggles for the exercise helper buttons in one view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonConfig {
    pub video: bool,
    pub image: bool,
    pub anatomy: bool,
}

/// Helper-button config per client view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseButtons {
    #[serde(rename = "routineForm")]
    pub routine_form: ButtonConfig,
    #[serde(rename = "workoutView")]
    pub workout_view: ButtonConfig,
}

impl Default for ExerciseButtons {
    fn default() -> Self {
        let defaults = ButtonConfig {
            video: true,
            image: false,
            anatomy: false,
        };
        Self {
            routine_form: defaults.clone(),
            workout_view: defaults,
        }
    }
}

/// A user's preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreference {
    pub user_id: String,
    pub weekly_goal: i64,
    pub lang: String,
    pub rest_timer_default: i64,
    pub theme: String,
    pub exercise_buttons: ExerciseButtons,
}

/// Partial preference update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    pub weekly_goal: Option<i64>,
    pub lang: Option<String>,
    pub rest_timer_default: Option<i64>,
    pub theme: Option<String>,
    pub exercise_buttons: Option<ExerciseButtonsUpdate>,
}

/// Partial helper-button update, per view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseButtonsUpdate {
    #[serde(rename = "routineForm")]
    pub routine_form: Option<ButtonConfig>,
    #[serde(rename = "workoutView")]
    pub workout_view: Option<ButtonConfig>,
}

impl UserPreference {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let buttons_json: String = row.get("exercise_buttons")?;
        let exercise_buttons: ExerciseButtons =
            serde_json::from_str(&buttons_json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Self {
            user_id: row.get("user_id")?,
            weekly_goal: row.get("weekly_goal")?,
            lang: row.get("lang")?,
            rest_timer_default: row.get("rest_timer_default")?,
            theme: row.get("theme")?,
            exercise_buttons,
        })
    }

    /// Get a user's preferences
    pub fn get(conn: &Connection, user_id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM user_preferences WHERE user_id = ?1")?;

        let result = stmt.query_row([user_id], Self::from_row);
        match result {
            Ok(prefs) => Ok(Some(prefs)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user's preferences, creating the default row on first read
    pub fn get_or_create(conn: &Connection, user_id: &str) -> DbResult<Self> {
        if let Some(prefs) = Self::get(conn, user_id)? {
            return Ok(prefs);
        }

        let buttons_json = serde_json::to_string(&ExerciseButtons::default())?;
        conn.execute(
            "INSERT INTO user_preferences (user_id, exercise_buttons) VALUES (?1, ?2)",
            params![user_id, buttons_json],
        )?;

        Self::get(conn, user_id)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Persist this row's current values
    pub fn save(&self, conn: &Connection) -> DbResult<()> {
        let buttons_json = serde_json::to_string(&self.exercise_buttons)?;
        conn.execute(
            r#"
            UPDATE user_preferences
            SET weekly_goal = ?1,
                lang = ?2,
                rest_timer_default = ?3,
                theme = ?4,
                exercise_buttons = ?5
            WHERE user_id = ?6
            "#,
            params![
                self.weekly_goal,
                self.lang,
                self.rest_timer_default,
                self.theme,
                buttons_json,
                self.user_id,
            ],
        )?;
        Ok(())
    }
}
