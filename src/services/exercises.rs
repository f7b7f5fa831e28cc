//! Custom exercise service
//!
//! CRUD over user-defined exercises. Client-assigned ids must follow the
//! `custom_<digits>` shape so they stay disjoint from catalog ids.

use crate::db::Database;
use crate::models::{CustomExercise, CustomExerciseCreate, CustomExerciseUpdate};

use super::{ServiceError, ServiceResult};

fn validate_id(id: &str) -> ServiceResult<()> {
    let digits = id.strip_prefix("custom_").unwrap_or("");
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ServiceError::InvalidInput(format!(
            "exercise id {id:?} must match custom_<digits>"
        )));
    }
    Ok(())
}

/// List the user's custom exercises
pub fn list_exercises(db: &Database, user_id: &str) -> ServiceResult<Vec<CustomExercise>> {
    Ok(db.with_conn(|conn| CustomExercise::list_for_user(conn, user_id))?)
}

/// Create a custom exercise
pub fn create_exercise(
    db: &Database,
    user_id: &str,
    data: &CustomExerciseCreate,
) -> ServiceResult<CustomExercise> {
    validate_id(&data.id)?;
    if data.name.trim().is_empty() || data.muscle.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "name and muscle must not be empty".to_string(),
        ));
    }

    Ok(db.with_conn(|conn| CustomExercise::create(conn, user_id, data))?)
}

/// Update a custom exercise's provided fields
pub fn update_exercise(
    db: &Database,
    user_id: &str,
    exercise_id: &str,
    data: &CustomExerciseUpdate,
) -> ServiceResult<CustomExercise> {
    db.with_conn(|conn| CustomExercise::update(conn, exercise_id, user_id, data))?
        .ok_or(ServiceError::NotFound("Exercise"))
}

/// Delete a custom exercise
pub fn delete_exercise(db: &Database, user_id: &str, exercise_id: &str) -> ServiceResult<()> {
    if db.with_conn(|conn| CustomExercise::delete(conn, exercise_id, user_id))? {
        Ok(())
    } else {
        Err(ServiceError::NotFound("Exercise"))
    }
}
