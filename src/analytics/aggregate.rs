//! Analytics aggregation
//!
//! The orchestration entry points. Both operate on the caller's full session
//! history, ascending by finish time, and are deterministic: the same input
//! list always produces the same output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Plan, Session};

use super::buckets::{weekly_frequency, FrequencyBucket};
use super::extract::{session_volume, set_count, tally_muscles};
use super::tier::require_premium;
use super::AnalyticsError;

// ============================================================================
// Result Types
// ============================================================================

/// Summary stats available to every tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    pub total_workouts: usize,
    pub total_sets: usize,
    pub avg_duration: i64,
    pub total_minutes: i64,
}

/// Total lifted volume for one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumePoint {
    pub date: String,
    pub volume: f64,
}

/// Duration of one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationPoint {
    pub date: String,
    pub minutes: i64,
}

/// Set count of one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetsPoint {
    pub date: String,
    pub sets: usize,
}

/// Sets logged per muscle group across the whole history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuscleSplit {
    pub muscle: String,
    pub sets: i64,
}

/// The five premium chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub volume: Vec<VolumePoint>,
    pub duration: Vec<DurationPoint>,
    pub sets: Vec<SetsPoint>,
    pub muscle_split: Vec<MuscleSplit>,
    pub frequency: Vec<FrequencyBucket>,
}

/// Premium result shape. Carries its own stats block so the endpoint is
/// self-contained alongside the basic one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullAnalytics {
    pub stats: BasicStats,
    pub charts: ChartData,
}

// ============================================================================
// Aggregation Entry Points
// ============================================================================

/// Basic stats, available to every tier.
///
/// `avg_duration` averages only strictly-positive durations (0 when there
/// are none); `total_minutes` sums every duration including zeros.
pub fn basic_stats(sessions: &[Session]) -> BasicStats {
    let total_sets = sessions.iter().map(|s| set_count(&s.logs)).sum();
    let total_minutes = sessions.iter().map(|s| s.duration_minutes).sum();

    let positive: Vec<i64> = sessions
        .iter()
        .map(|s| s.duration_minutes)
        .filter(|d| *d > 0)
        .collect();
    let avg_duration = if positive.is_empty() {
        0
    } else {
        (positive.iter().sum::<i64>() as f64 / positive.len() as f64).round() as i64
    };

    BasicStats {
        total_workouts: sessions.len(),
        total_sets,
        avg_duration,
        total_minutes,
    }
}

/// Full analytics: basic stats plus the five chart series. Premium only —
/// free-tier callers are rejected before any aggregation work.
pub fn full_analytics(
    sessions: &[Session],
    plan: Plan,
) -> Result<FullAnalytics, AnalyticsError> {
    require_premium(plan)?;

    let mut volume = Vec::with_capacity(sessions.len());
    let mut duration = Vec::with_capacity(sessions.len());
    let mut sets = Vec::with_capacity(sessions.len());
    let mut muscle_counts: BTreeMap<String, i64> = BTreeMap::new();

    for session in sessions {
        volume.push(VolumePoint {
            date: session.finished_at.clone(),
            volume: session_volume(&session.logs),
        });
        // Zero-duration sessions stay in the series
        duration.push(DurationPoint {
            date: session.finished_at.clone(),
            minutes: session.duration_minutes,
        });
        sets.push(SetsPoint {
            date: session.finished_at.clone(),
            sets: set_count(&session.logs),
        });
        tally_muscles(&session.logs, &mut muscle_counts);
    }

    let frequency = weekly_frequency(sessions)?;
    let muscle_split = muscle_counts
        .into_iter()
        .map(|(muscle, sets)| MuscleSplit { muscle, sets })
        .collect();

    Ok(FullAnalytics {
        stats: basic_stats(sessions),
        charts: ChartData {
            volume,
            duration,
            sets,
            muscle_split,
            frequency,
        },
    })
}
