//! Liftbase library
//!
//! Core functionality for a fitness tracking backend: routines, workout
//! sessions, exercise customization, preferences, subscription plan state,
//! and the premium analytics aggregation engine.

pub mod analytics;
pub mod db;
pub mod models;
pub mod services;
