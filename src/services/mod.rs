//! Service layer
//!
//! Per-feature service functions invoked in-process by the HTTP layer.
//! Callers hand these a verified user id (or a loaded profile); JWT
//! verification itself is delegated to the identity provider.

pub mod admin;
pub mod analytics;
pub mod billing;
pub mod config;
pub mod exercises;
pub mod migrate;
pub mod preferences;
pub mod profiles;
pub mod routines;
pub mod sessions;

use thiserror::Error;

use crate::analytics::AnalyticsError;
use crate::db::DbError;

/// Service error types, with an HTTP status mapping for the API layer
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("premium subscription required")]
    PremiumRequired,

    #[error("free tier limited to {limit} routines")]
    RoutineLimit { limit: i64 },

    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl ServiceError {
    /// HTTP status code the API layer should respond with
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::PremiumRequired | ServiceError::RoutineLimit { .. } => 403,
            ServiceError::InvalidInput(_) => 400,
            ServiceError::Analytics(AnalyticsError::PremiumRequired) => 403,
            ServiceError::Analytics(AnalyticsError::MalformedTimestamp(_)) => 422,
            ServiceError::Db(_) => 500,
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
