//! Routine service
//!
//! CRUD over routines with the free-tier count limit enforced at creation.

use tracing::info;

use crate::db::Database;
use crate::models::{Profile, Routine, RoutineCreate, RoutineUpdate};

use super::{ServiceError, ServiceResult};

/// Routines a free-tier user may keep
pub const FREE_ROUTINE_LIMIT: i64 = 3;

/// List the user's routines, ordered by position then creation time
pub fn list_routines(db: &Database, user_id: &str) -> ServiceResult<Vec<Routine>> {
    Ok(db.with_conn(|conn| Routine::list_for_user(conn, user_id))?)
}

/// Get one routine by id
pub fn get_routine(db: &Database, user_id: &str, routine_id: &str) -> ServiceResult<Routine> {
    db.with_conn(|conn| Routine::get_by_id(conn, routine_id, user_id))?
        .ok_or(ServiceError::NotFound("Routine"))
}

/// Create a routine; free-tier users are capped at `FREE_ROUTINE_LIMIT`
pub fn create_routine(
    db: &Database,
    profile: &Profile,
    data: &RoutineCreate,
) -> ServiceResult<Routine> {
    if data.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "name must not be empty".to_string(),
        ));
    }

    if !profile.plan.is_premium() {
        let count = db.with_conn(|conn| Routine::count_for_user(conn, &profile.id))?;
        if count >= FREE_ROUTINE_LIMIT {
            return Err(ServiceError::RoutineLimit {
                limit: FREE_ROUTINE_LIMIT,
            });
        }
    }

    let routine = db.with_conn(|conn| Routine::create(conn, &profile.id, data))?;
    info!(user_id = %profile.id, routine_id = %routine.id, "routine created");
    Ok(routine)
}

/// Update a routine's provided fields
pub fn update_routine(
    db: &Database,
    user_id: &str,
    routine_id: &str,
    data: &RoutineUpdate,
) -> ServiceResult<Routine> {
    db.with_conn(|conn| Routine::update(conn, routine_id, user_id, data))?
        .ok_or(ServiceError::NotFound("Routine"))
}

/// Delete a routine
pub fn delete_routine(db: &Database, user_id: &str, routine_id: &str) -> ServiceResult<()> {
    if db.with_conn(|conn| Routine::delete(conn, routine_id, user_id))? {
        info!(user_id, routine_id, "routine deleted");
        Ok(())
    } else {
        Err(ServiceError::NotFound("Routine"))
    }
}
