//! Session service
//!
//! List, record, and delete workout sessions. Storage sits behind the
//! `SessionRepository` trait so the analytics service can be exercised
//! against any backend that can produce a user's ordered history.

use tracing::info;

use crate::db::{Database, DbResult};
use crate::models::{Session, SessionCreate};

use super::{ServiceError, ServiceResult};

/// Storage contract for sessions. `list_chronological` is the analytics
/// read interface: the full history, ascending by finish time, in one query.
pub trait SessionRepository {
    /// A user's sessions, newest first (history view)
    fn list(&self, user_id: &str) -> DbResult<Vec<Session>>;

    /// A user's sessions, ascending by finish time (analytics input)
    fn list_chronological(&self, user_id: &str) -> DbResult<Vec<Session>>;

    /// Persist a new session
    fn create(&self, user_id: &str, data: &SessionCreate) -> DbResult<Session>;

    /// Delete a session owned by the user; false when nothing matched
    fn delete(&self, session_id: &str, user_id: &str) -> DbResult<bool>;
}

/// SQLite-backed session repository
#[derive(Clone)]
pub struct SqliteSessionRepository {
    db: Database,
}

impl SqliteSessionRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl SessionRepository for SqliteSessionRepository {
    fn list(&self, user_id: &str) -> DbResult<Vec<Session>> {
        self.db.with_conn(|conn| Session::list_for_user(conn, user_id))
    }

    fn list_chronological(&self, user_id: &str) -> DbResult<Vec<Session>> {
        self.db
            .with_conn(|conn| Session::list_chronological(conn, user_id))
    }

    fn create(&self, user_id: &str, data: &SessionCreate) -> DbResult<Session> {
        self.db.with_conn(|conn| Session::create(conn, user_id, data))
    }

    fn delete(&self, session_id: &str, user_id: &str) -> DbResult<bool> {
        self.db
            .with_conn(|conn| Session::delete(conn, session_id, user_id))
    }
}

/// List a user's session history, newest first
pub fn list_sessions(repo: &dyn SessionRepository, user_id: &str) -> ServiceResult<Vec<Session>> {
    Ok(repo.list(user_id)?)
}

/// Record a completed workout
pub fn create_session(
    repo: &dyn SessionRepository,
    user_id: &str,
    data: &SessionCreate,
) -> ServiceResult<Session> {
    if data.routine_name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "routine_name must not be empty".to_string(),
        ));
    }
    if data.duration_minutes < 0 {
        return Err(ServiceError::InvalidInput(
            "duration_minutes must be >= 0".to_string(),
        ));
    }

    let session = repo.create(user_id, data)?;
    info!(user_id, session_id = %session.id, "session recorded");
    Ok(session)
}

/// Delete one of the user's sessions
pub fn delete_session(
    repo: &dyn SessionRepository,
    user_id: &str,
    session_id: &str,
) -> ServiceResult<()> {
    if repo.delete(session_id, user_id)? {
        info!(user_id, session_id, "session deleted");
        Ok(())
    } else {
        Err(ServiceError::NotFound("Session"))
    }
}
