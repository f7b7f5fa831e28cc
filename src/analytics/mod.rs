//! Analytics aggregation engine
//!
//! Turns a user's raw session history into derived statistics and chart
//! series. The whole pipeline is a pure, single-pass transform over sessions
//! already fetched into memory: extraction (per-session metrics), bucketing
//! (ISO calendar weeks), aggregation (basic and full result shapes), and the
//! free/premium tier gate.

pub mod aggregate;
pub mod buckets;
pub mod extract;
pub mod tier;

use thiserror::Error;

pub use aggregate::{
    basic_stats, full_analytics, BasicStats, ChartData, DurationPoint, FullAnalytics,
    MuscleSplit, SetsPoint, VolumePoint,
};
pub use buckets::FrequencyBucket;
pub use tier::require_premium;

/// Analytics error types
///
/// Malformed numeric set-entry fields are deliberately not represented here:
/// they degrade to "excluded from volume" inside the extractor and never
/// surface as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// A free-tier caller requested the premium result shape. Raised before
    /// any aggregation work happens; the API layer maps it to 403.
    #[error("premium subscription required")]
    PremiumRequired,

    /// A session's finish timestamp has no parsable `YYYY-MM-DD` prefix.
    /// Fatal: guessing a week bucket would silently misfile the session.
    #[error("unparsable finish timestamp: {0:?}")]
    MalformedTimestamp(String),
}
