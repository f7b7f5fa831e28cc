//! Preference service
//!
//! Reads create the default row on first sight; updates merge only the
//! provided fields. Any theme other than the default "dark" is a premium
//! feature.

use crate::db::Database;
use crate::models::{PreferenceUpdate, Profile, UserPreference};

use super::{ServiceError, ServiceResult};

/// Get the user's preferences, creating defaults on first read
pub fn get_preferences(db: &Database, user_id: &str) -> ServiceResult<UserPreference> {
    Ok(db.with_conn(|conn| UserPreference::get_or_create(conn, user_id))?)
}

/// Apply a partial preference update
pub fn update_preferences(
    db: &Database,
    profile: &Profile,
    data: &PreferenceUpdate,
) -> ServiceResult<UserPreference> {
    let mut prefs = db.with_conn(|conn| UserPreference::get_or_create(conn, &profile.id))?;

    if let Some(theme) = &data.theme {
        if theme != "dark" && !profile.plan.is_premium() {
            return Err(ServiceError::PremiumRequired);
        }
        prefs.theme = theme.clone();
    }

    if let Some(weekly_goal) = data.weekly_goal {
        prefs.weekly_goal = weekly_goal;
    }
    if let Some(lang) = &data.lang {
        prefs.lang = lang.clone();
    }
    if let Some(rest_timer) = data.rest_timer_default {
        prefs.rest_timer_default = rest_timer;
    }
    if let Some(buttons) = &data.exercise_buttons {
        if let Some(routine_form) = &buttons.routine_form {
            prefs.exercise_buttons.routine_form = routine_form.clone();
        }
        if let Some(workout_view) = &buttons.workout_view {
            prefs.exercise_buttons.workout_view = workout_view.clone();
        }
    }

    db.with_conn(|conn| prefs.save(conn))?;
    Ok(prefs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::models::{ButtonConfig, ExerciseButtonsUpdate, Plan};

    fn setup() -> (Database, Profile) {
        let db = Database::open_in_memory().unwrap();
        let profile = db
            .with_conn(|conn| {
                migrations::run_migrations(conn)?;
                Profile::get_or_create(conn, "user-1")
            })
            .unwrap();
        (db, profile)
    }

    #[test]
    fn test_theme_gated_for_free_tier() {
        let (db, profile) = setup();

        let err = update_preferences(
            &db,
            &profile,
            &PreferenceUpdate {
                theme: Some("synthwave".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::PremiumRequired));

        // Default theme passes for free tier
        let prefs = update_preferences(
            &db,
            &profile,
            &PreferenceUpdate {
                theme: Some("dark".to_string()),
                weekly_goal: Some(5),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(prefs.weekly_goal, 5);
    }

    #[test]
    fn test_premium_theme_and_partial_button_update() {
        let (db, _) = setup();
        let profile = db
            .with_conn(|conn| {
                Profile::set_plan(conn, "user-1", Plan::Premium)?;
                Profile::get_or_create(conn, "user-1")
            })
            .unwrap();

        let prefs = update_preferences(
            &db,
            &profile,
            &PreferenceUpdate {
                theme: Some("synthwave".to_string()),
                exercise_buttons: Some(ExerciseButtonsUpdate {
                    workout_view: Some(ButtonConfig {
                        video: false,
                        image: true,
                        anatomy: true,
                    }),
                    routine_form: None,
                }),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(prefs.theme, "synthwave");
        assert!(prefs.exercise_buttons.workout_view.anatomy);
        // Untouched view keeps its defaults
        assert!(prefs.exercise_buttons.routine_form.video);

        let reread = get_preferences(&db, "user-1").unwrap();
        assert_eq!(reread, prefs);
    }
}
