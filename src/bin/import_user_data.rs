//! One-shot import of a user's exported data dump
//!
//! Used when moving locally stored data into the backend:
//! `import_user_data <user_id> <dump.json>` where the file holds the
//! client's export — routines, sessions, custom exercises, and preferences.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use liftbase::db::migrations;
use liftbase::services::migrate::{migrate_user_data, MigratePayload};

/// Get the database path from environment or use default
fn get_database_path() -> PathBuf {
    std::env::var("LIFTBASE_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = PathBuf::from("data");
            std::fs::create_dir_all(&path).ok();
            path.push("liftbase.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("liftbase=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (user_id, file) = match (args.next(), args.next()) {
        (Some(user_id), Some(file)) => (user_id, PathBuf::from(file)),
        _ => {
            eprintln!("Usage: import_user_data <user_id> <dump.json>");
            std::process::exit(2);
        }
    };

    let payload: MigratePayload = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
    info!(
        %user_id,
        file = %file.display(),
        routines = payload.routines.len(),
        sessions = payload.sessions.len(),
        exercises = payload.custom_exercises.len(),
        "importing user data"
    );

    let db_path = get_database_path();
    let database = liftbase::db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        if migrations::needs_migration(conn)? {
            migrations::run_migrations(conn)?;
        }
        let version = migrations::get_schema_version(conn)?;
        info!(version, db = %db_path.display(), "database ready");
        liftbase::models::Profile::get_or_create(conn, &user_id)?;
        Ok(())
    })?;

    let summary = migrate_user_data(&database, &user_id, &payload)?;
    println!(
        "Imported {} routines, {} sessions, {} exercises for {user_id}",
        summary.routines, summary.sessions, summary.exercises
    );
    Ok(())
}
