//! Aggregate counts over a generated run.

use crate::constants::MID_STAY_SNAPSHOT_THRESHOLD_MINUTES;
use er_types::{EventBundle, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-run tallies reported by the binaries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub patients: usize,
    pub observations: usize,
    /// Visits that received a mid-stay snapshot.
    pub long_stays: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_condition: BTreeMap<String, usize>,
}

impl GenerationSummary {
    pub fn from_bundles(bundles: &[EventBundle]) -> Self {
        let mut summary = Self {
            patients: bundles.len(),
            ..Self::default()
        };

        for bundle in bundles {
            summary.observations += bundle.reading_count();
            if bundle.condition.duration_minutes > MID_STAY_SNAPSHOT_THRESHOLD_MINUTES {
                summary.long_stays += 1;
            }
            *summary
                .by_severity
                .entry(bundle.condition.severity)
                .or_default() += 1;
            *summary
                .by_condition
                .entry(bundle.condition.name.clone())
                .or_default() += 1;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate;
    use chrono::{DateTime, Duration, Utc};

    #[test]
    fn counts_add_up() {
        let start = "2026-10-19T00:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid datetime");
        let bundles = generate(start, start + Duration::hours(48), 42).expect("generate");
        let summary = GenerationSummary::from_bundles(&bundles);

        assert_eq!(summary.patients, bundles.len());
        assert_eq!(summary.by_severity.values().sum::<usize>(), bundles.len());
        assert_eq!(summary.by_condition.values().sum::<usize>(), bundles.len());
        assert_eq!(
            summary.observations,
            6 * (bundles.len() + summary.long_stays)
        );
    }

    #[test]
    fn severity_keys_serialise_as_names() {
        let mut summary = GenerationSummary::default();
        summary.by_severity.insert(Severity::High, 3);

        let json = serde_json::to_value(&summary).expect("serialise summary");
        assert_eq!(json["by_severity"]["high"], 3);
    }

    #[test]
    fn empty_run_is_all_zero() {
        assert_eq!(GenerationSummary::from_bundles(&[]), GenerationSummary::default());
    }
}
