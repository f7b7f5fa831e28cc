//! Data models
//!
//! Rust structs representing database entities.

mod app_config;
mod exercise;
mod preference;
mod profile;
mod routine;
mod session;

pub use app_config::AppConfig;
pub use exercise::{CustomExercise, CustomExerciseCreate, CustomExerciseUpdate};
pub use preference::{
    ButtonConfig, ExerciseButtons, ExerciseButtonsUpdate, PreferenceUpdate, UserPreference,
};
pub use profile::{Plan, Profile};
pub use routine::{Routine, RoutineCreate, RoutineUpdate};
pub use session::{LogMap, Session, SessionCreate, SetEntry};
