//! Admin reporting service
//!
//! Read-only reports over the whole user base. Like config writes, these are
//! reserved for the admin surface; the API layer checks `profile.is_admin`
//! before calling them.

use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;

use crate::db::{Database, DbResult};

use super::ServiceResult;

/// Head counts per plan plus today's activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBaseStats {
    pub total_users: i64,
    pub free_users: i64,
    pub premium_users: i64,
    pub sessions_today: i64,
}

/// How many distinct users created a given name + muscle combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExercisePopularity {
    pub name: String,
    pub muscle: String,
    pub user_count: i64,
}

/// User-base stats: total/free/premium head counts and sessions finished
/// since local midnight
pub fn user_base_stats(db: &Database) -> ServiceResult<UserBaseStats> {
    let today = Local::now().date_naive().to_string();
    Ok(db.with_conn(|conn| stats_since(conn, &today))?)
}

fn stats_since(conn: &Connection, day_start: &str) -> DbResult<UserBaseStats> {
    let (total_users, free_users, premium_users) = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(plan = 'free'), 0),
                COALESCE(SUM(plan = 'premium'), 0)
         FROM profiles",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let sessions_today: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE finished_at >= ?1",
        [day_start],
        |row| row.get(0),
    )?;

    Ok(UserBaseStats {
        total_users,
        free_users,
        premium_users,
        sessions_today,
    })
}

/// Custom exercises grouped by name + muscle with the number of distinct
/// users who created each combination, most popular first. Combinations many
/// users keep re-creating are candidates for the built-in catalog.
pub fn exercise_popularity(db: &Database) -> ServiceResult<Vec<ExercisePopularity>> {
    Ok(db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT name, muscle, COUNT(DISTINCT user_id) AS user_count
             FROM custom_exercises
             GROUP BY name, muscle
             ORDER BY user_count DESC, name, muscle",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ExercisePopularity {
                    name: row.get(0)?,
                    muscle: row.get(1)?,
                    user_count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::models::{
        CustomExercise, CustomExerciseCreate, LogMap, Plan, Profile, Session, SessionCreate,
    };

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn)).unwrap();
        db
    }

    fn record_session(conn: &rusqlite::Connection, user_id: &str, finished_at: &str) {
        Session::create(
            conn,
            user_id,
            &SessionCreate {
                routine_id: None,
                routine_name: "Push".to_string(),
                started_at: finished_at.to_string(),
                finished_at: finished_at.to_string(),
                duration_minutes: 30,
                logs: LogMap::new(),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_empty_database_reports_zeros() {
        let db = setup();
        let stats = user_base_stats(&db).unwrap();
        assert_eq!(
            stats,
            UserBaseStats {
                total_users: 0,
                free_users: 0,
                premium_users: 0,
                sessions_today: 0,
            }
        );
        assert!(exercise_popularity(&db).unwrap().is_empty());
    }

    #[test]
    fn test_plan_counts_and_sessions_today() {
        let db = setup();
        let stats = db
            .with_conn(|conn| {
                Profile::get_or_create(conn, "user-1")?;
                Profile::get_or_create(conn, "user-2")?;
                Profile::get_or_create(conn, "user-3")?;
                Profile::set_plan(conn, "user-3", Plan::Premium)?;

                // One session today, one the evening before
                record_session(conn, "user-1", "2026-03-10T08:00:00");
                record_session(conn, "user-2", "2026-03-09T23:59:00");

                stats_since(conn, "2026-03-10")
            })
            .unwrap();

        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.free_users, 2);
        assert_eq!(stats.premium_users, 1);
        assert_eq!(stats.sessions_today, 1);
    }

    #[test]
    fn test_popularity_counts_distinct_users() {
        let db = setup();
        db.with_conn(|conn| {
            Profile::get_or_create(conn, "user-1")?;
            Profile::get_or_create(conn, "user-2")?;

            let entries = [
                ("user-1", "custom_1", "Cable fly", "chest"),
                ("user-2", "custom_2", "Cable fly", "chest"),
                // Same name, different muscle: separate row
                ("user-2", "custom_3", "Cable fly", "shoulders"),
                ("user-1", "custom_4", "Landmine press", "shoulders"),
            ];
            for (user_id, id, name, muscle) in entries {
                CustomExercise::create(
                    conn,
                    user_id,
                    &CustomExerciseCreate {
                        id: id.to_string(),
                        name: name.to_string(),
                        muscle: muscle.to_string(),
                    },
                )?;
            }
            Ok(())
        })
        .unwrap();

        let report = exercise_popularity(&db).unwrap();
        assert_eq!(report.len(), 3);
        assert_eq!(report[0].name, "Cable fly");
        assert_eq!(report[0].muscle, "chest");
        assert_eq!(report[0].user_count, 2);
        assert!(report[1..].iter().all(|r| r.user_count == 1));
    }
}
