//! Anonymous-data migration service
//!
//! Runs once after a user registers: takes the client's full local-storage
//! dump (routines, sessions, custom exercises, preferences) and inserts it
//! under the new account. An existing preference row wins over the imported
//! one.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::Database;
use crate::models::{
    CustomExercise, CustomExerciseCreate, ExerciseButtons, LogMap, Routine, RoutineCreate,
    Session, SessionCreate, UserPreference,
};

use super::ServiceResult;

fn default_weekly_goal() -> i64 {
    4
}
fn default_lang() -> String {
    "es".to_string()
}
fn default_rest_timer() -> i64 {
    90
}
fn default_theme() -> String {
    "dark".to_string()
}

/// One locally stored routine
#[derive(Debug, Clone, Deserialize)]
pub struct RoutineImport {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<String>,
}

/// One locally stored session; the client keeps a single `date` stamp, used
/// for both ends of the recorded interval
#[derive(Debug, Clone, Deserialize)]
pub struct SessionImport {
    #[serde(rename = "routineName", default)]
    pub routine_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub logs: LogMap,
}

/// One locally stored custom exercise
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseImport {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub muscle: String,
}

/// Locally stored preferences, in the client's camelCase key shape
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceImport {
    #[serde(rename = "weeklyGoal", default = "default_weekly_goal")]
    pub weekly_goal: i64,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(rename = "restTimerDefault", default = "default_rest_timer")]
    pub rest_timer_default: i64,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(rename = "exerciseButtons", default)]
    pub exercise_buttons: ExerciseButtons,
}

/// The full local-storage dump
#[derive(Debug, Clone, Deserialize)]
pub struct MigratePayload {
    #[serde(default)]
    pub routines: Vec<RoutineImport>,
    #[serde(default)]
    pub sessions: Vec<SessionImport>,
    #[serde(default)]
    pub custom_exercises: Vec<ExerciseImport>,
    #[serde(default)]
    pub preferences: Option<PreferenceImport>,
}

/// What was inserted, for the migration response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationSummary {
    pub routines: usize,
    pub sessions: usize,
    pub exercises: usize,
}

/// Insert the whole dump for `user_id`. Preferences are only written when the
/// user has no preference row yet.
pub fn migrate_user_data(
    db: &Database,
    user_id: &str,
    payload: &MigratePayload,
) -> ServiceResult<MigrationSummary> {
    let summary = db.with_conn(|conn| {
        for routine in &payload.routines {
            Routine::create(
                conn,
                user_id,
                &RoutineCreate {
                    name: routine.name.clone(),
                    exercises: routine.exercises.clone(),
                    position: 0,
                },
            )?;
        }

        for session in &payload.sessions {
            Session::create(
                conn,
                user_id,
                &SessionCreate {
                    routine_id: None,
                    routine_name: session.routine_name.clone(),
                    started_at: session.date.clone(),
                    finished_at: session.date.clone(),
                    duration_minutes: session.duration,
                    logs: session.logs.clone(),
                },
            )?;
        }

        for (n, exercise) in payload.custom_exercises.iter().enumerate() {
            // Old clients may omit the id; mint one in the usual shape
            let id = if exercise.id.is_empty() {
                format!("custom_{}{n}", chrono::Utc::now().timestamp_millis())
            } else {
                exercise.id.clone()
            };
            CustomExercise::create(
                conn,
                user_id,
                &CustomExerciseCreate {
                    id,
                    name: exercise.name.clone(),
                    muscle: exercise.muscle.clone(),
                },
            )?;
        }

        if let Some(imported) = &payload.preferences {
            if UserPreference::get(conn, user_id)?.is_none() {
                let mut prefs = UserPreference::get_or_create(conn, user_id)?;
                prefs.weekly_goal = imported.weekly_goal;
                prefs.lang = imported.lang.clone();
                prefs.rest_timer_default = imported.rest_timer_default;
                prefs.theme = imported.theme.clone();
                prefs.exercise_buttons = imported.exercise_buttons.clone();
                prefs.save(conn)?;
            }
        }

        Ok(MigrationSummary {
            routines: payload.routines.len(),
            sessions: payload.sessions.len(),
            exercises: payload.custom_exercises.len(),
        })
    })?;

    info!(
        user_id,
        routines = summary.routines,
        sessions = summary.sessions,
        exercises = summary.exercises,
        "anonymous data migrated"
    );
    Ok(summary)
}
