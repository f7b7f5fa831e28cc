//! Per-session metric extraction
//!
//! Pure functions deriving scalar contributions from one session's log
//! mapping. Clients store weight and reps as text and sometimes log
//! placeholders ("N/A", "BW"); a non-numeric field excludes the entry from
//! volume but the set itself still counts.

use std::collections::BTreeMap;

use crate::models::{LogMap, SetEntry};

/// Parse a textual metric field as a number. Whitespace is tolerated;
/// anything else non-numeric yields None.
pub fn parse_numeric(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

/// Volume contribution of a single set: weight x reps when both fields are
/// numeric, otherwise 0.
pub fn entry_volume(entry: &SetEntry) -> f64 {
    match (parse_numeric(&entry.weight), parse_numeric(&entry.reps)) {
        (Some(weight), Some(reps)) => weight * reps,
        _ => 0.0,
    }
}

/// Total volume across every set entry in a session's logs
pub fn session_volume(logs: &LogMap) -> f64 {
    logs.values().flatten().map(entry_volume).sum()
}

/// Number of sets logged in a session, across all exercises
pub fn set_count(logs: &LogMap) -> usize {
    logs.values().map(Vec::len).sum()
}

/// Add one count per muscle-tagged set entry into `counts`. Counts every
/// tagged set, including those with non-numeric weight or reps.
pub fn tally_muscles(logs: &LogMap, counts: &mut BTreeMap<String, i64>) {
    for entry in logs.values().flatten() {
        if let Some(muscle) = &entry.muscle {
            if !muscle.is_empty() {
                *counts.entry(muscle.clone()).or_insert(0) += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(weight: &str, reps: &str, muscle: Option<&str>) -> SetEntry {
        SetEntry {
            weight: weight.to_string(),
            reps: reps.to_string(),
            is_pr: None,
            muscle: muscle.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("10"), Some(10.0));
        assert_eq!(parse_numeric("12.5"), Some(12.5));
        assert_eq!(parse_numeric(" 10 "), Some(10.0));
        assert_eq!(parse_numeric("N/A"), None);
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("10kg"), None);
    }

    #[test]
    fn test_entry_volume() {
        assert_eq!(entry_volume(&entry("10", "5", None)), 50.0);
        assert_eq!(entry_volume(&entry("N/A", "5", None)), 0.0);
        assert_eq!(entry_volume(&entry("10", "-", None)), 0.0);
    }

    #[test]
    fn test_session_volume_skips_malformed_entries() {
        let mut logs = LogMap::new();
        logs.insert(
            "bench_press".to_string(),
            vec![entry("50", "10", None), entry("N/A", "10", None)],
        );
        logs.insert("squat".to_string(), vec![entry("100", "5", None)]);

        assert_eq!(session_volume(&logs), 1000.0);
        // Malformed entries still count as sets
        assert_eq!(set_count(&logs), 3);
    }

    #[test]
    fn test_set_count_empty_logs() {
        assert_eq!(set_count(&LogMap::new()), 0);
    }

    #[test]
    fn test_tally_muscles_ignores_numeric_validity() {
        let mut logs = LogMap::new();
        logs.insert(
            "bench_press".to_string(),
            vec![
                entry("50", "10", Some("chest")),
                entry("N/A", "x", Some("chest")),
                entry("20", "12", Some("")),
                entry("20", "12", None),
            ],
        );

        let mut counts = BTreeMap::new();
        tally_muscles(&logs, &mut counts);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["chest"], 2);
    }
}
