//! Calendar-week bucketing
//!
//! Assigns sessions to ISO calendar weeks for the frequency chart. Buckets
//! are sparse (weeks without sessions are absent) and the `YYYY-Www` key
//! format sorts lexicographically in chronological order.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::Session;

use super::AnalyticsError;

/// Sessions-per-week bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyBucket {
    pub week: String,
    pub count: i64,
}

/// ISO week key (`"2026-W05"`) for a finish timestamp. Only the first 10
/// characters (`YYYY-MM-DD`) are read; an unparsable prefix fails the whole
/// aggregation rather than misfiling the session.
pub fn week_key(finished_at: &str) -> Result<String, AnalyticsError> {
    let date_part = finished_at
        .get(..10)
        .ok_or_else(|| AnalyticsError::MalformedTimestamp(finished_at.to_string()))?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| AnalyticsError::MalformedTimestamp(finished_at.to_string()))?;

    let iso = date.iso_week();
    Ok(format!("{}-W{:02}", iso.year(), iso.week()))
}

/// Group sessions into per-week counts, ascending by week key
pub fn weekly_frequency(sessions: &[Session]) -> Result<Vec<FrequencyBucket>, AnalyticsError> {
    let mut buckets: BTreeMap<String, i64> = BTreeMap::new();

    for session in sessions {
        *buckets.entry(week_key(&session.finished_at)?).or_insert(0) += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(week, count)| FrequencyBucket { week, count })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogMap;

    fn session(finished_at: &str) -> Session {
        Session {
            id: "s".to_string(),
            user_id: "user-1".to_string(),
            routine_id: None,
            routine_name: "Push".to_string(),
            started_at: finished_at.to_string(),
            finished_at: finished_at.to_string(),
            duration_minutes: 30,
            logs: LogMap::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_week_key_zero_padded() {
        assert_eq!(week_key("2026-02-01T10:00").unwrap(), "2026-W05");
        assert_eq!(week_key("2026-01-07T08:00:00").unwrap(), "2026-W02");
    }

    #[test]
    fn test_week_key_iso_year_rollover() {
        // Dec 30 2024 belongs to ISO week 1 of 2025
        assert_eq!(week_key("2024-12-30T18:00:00").unwrap(), "2025-W01");
    }

    #[test]
    fn test_week_key_malformed() {
        assert_eq!(
            week_key("not-a-date"),
            Err(AnalyticsError::MalformedTimestamp("not-a-date".to_string()))
        );
        assert!(week_key("2026").is_err());
    }

    #[test]
    fn test_weekly_frequency_groups_and_sorts() {
        let sessions = vec![
            session("2026-02-12T10:00"), // W07
            session("2026-02-01T10:00"), // W05
            session("2026-02-10T10:00"), // W07
        ];

        let buckets = weekly_frequency(&sessions).unwrap();
        assert_eq!(
            buckets,
            vec![
                FrequencyBucket {
                    week: "2026-W05".to_string(),
                    count: 1
                },
                FrequencyBucket {
                    week: "2026-W07".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_weekly_frequency_sparse() {
        let buckets = weekly_frequency(&[session("2026-02-01T10:00")]).unwrap();
        // No zero-filled buckets for the surrounding empty weeks
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn test_weekly_frequency_empty() {
        assert!(weekly_frequency(&[]).unwrap().is_empty());
    }
}
