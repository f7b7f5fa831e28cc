//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- PROFILES
        -- One row per authenticated user; plan drives feature gating
        -- ============================================
        CREATE TABLE profiles (
            id TEXT PRIMARY KEY,                 -- user id from the identity provider
            plan TEXT NOT NULL DEFAULT 'free' CHECK(plan IN ('free', 'premium')),
            stripe_customer_id TEXT,
            stripe_subscription_id TEXT,
            is_admin INTEGER NOT NULL DEFAULT 0, -- boolean
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_profiles_stripe_customer ON profiles(stripe_customer_id);

        -- ============================================
        -- ROUTINES
        -- Named, ordered exercise lists per user
        -- ============================================
        CREATE TABLE routines (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            exercises TEXT NOT NULL DEFAULT '[]', -- JSON array of exercise ids
            position INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_routines_user ON routines(user_id);

        -- ============================================
        -- SESSIONS
        -- Completed workouts; immutable once created
        -- ============================================
        CREATE TABLE sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            routine_id TEXT,                     -- source routine, if any
            routine_name TEXT NOT NULL,
            started_at TEXT NOT NULL,
            finished_at TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL CHECK(duration_minutes >= 0),
            logs TEXT NOT NULL DEFAULT '{}',     -- JSON: exercise id -> set entries
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_sessions_user ON sessions(user_id);
        CREATE INDEX idx_sessions_user_finished ON sessions(user_id, finished_at);

        -- ============================================
        -- CUSTOM EXERCISES
        -- User-defined exercises beyond the built-in catalog
        -- ============================================
        CREATE TABLE custom_exercises (
            id TEXT PRIMARY KEY,                 -- "custom_<timestamp>"
            user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            muscle TEXT NOT NULL
        );

        CREATE INDEX idx_custom_exercises_user ON custom_exercises(user_id);

        -- ============================================
        -- USER PREFERENCES
        -- One row per user, created on first read
        -- ============================================
        CREATE TABLE user_preferences (
            user_id TEXT PRIMARY KEY REFERENCES profiles(id) ON DELETE CASCADE,
            weekly_goal INTEGER NOT NULL DEFAULT 4,
            lang TEXT NOT NULL DEFAULT 'es',
            rest_timer_default INTEGER NOT NULL DEFAULT 90,
            theme TEXT NOT NULL DEFAULT 'dark',  -- non-dark themes are premium-gated
            exercise_buttons TEXT NOT NULL       -- JSON button visibility config
        );

        -- ============================================
        -- APP CONFIG
        -- Key/value store for publicly readable app settings
        -- ============================================
        CREATE TABLE app_config (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,                 -- JSON
            updated_by TEXT,                     -- admin user id
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_needs_migration_flips_after_run() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            assert!(needs_migration(conn)?);
            run_migrations(conn)?;
            assert!(!needs_migration(conn)?);
            assert_eq!(get_schema_version(conn)?, SCHEMA_VERSION);

            // Re-running is a no-op
            run_migrations(conn)?;
            assert_eq!(get_schema_version(conn)?, SCHEMA_VERSION);
            Ok(())
        })
        .unwrap();
    }
}
