//! Fixed visit fixtures for the formatting crates' tests.

use crate::{
    Condition, EventBundle, Gender, HumanName, ObservationSnapshot, Patient, Severity,
    VitalReading, VitalSign,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};

const SAMPLE_VALUES: [f64; 6] = [98.6, 112.0, 135.2, 88.4, 26.1, 91.5];

fn snapshot(taken_at: DateTime<Utc>, first_resource_id: u64) -> ObservationSnapshot {
    ObservationSnapshot {
        taken_at,
        readings: VitalSign::ALL
            .iter()
            .zip(SAMPLE_VALUES)
            .enumerate()
            .map(|(idx, (vital, value))| VitalReading {
                vital: *vital,
                value,
                resource_id: first_resource_id + idx as u64,
            })
            .collect(),
    }
}

/// A "Shortness of Breath" visit arriving at 18:30 UTC lasting `duration_minutes`.
pub fn sample_bundle(duration_minutes: u32) -> EventBundle {
    let arrival_time = "2026-10-19T18:30:00Z"
        .parse::<DateTime<Utc>>()
        .expect("valid arrival");
    let discharge_time = arrival_time + Duration::minutes(i64::from(duration_minutes));

    let mut snapshots = vec![snapshot(arrival_time, 3)];
    if duration_minutes > 120 {
        let mid = arrival_time + Duration::minutes(i64::from(duration_minutes / 2));
        snapshots.push(snapshot(mid, 9));
    }

    EventBundle {
        arrival_time,
        patient: Patient {
            id: "PAT000001".into(),
            mrn: "MRN100001".into(),
            name: HumanName {
                given: "Sarah".into(),
                family: "Williams".into(),
            },
            gender: Gender::Female,
            birth_date: NaiveDate::from_ymd_opt(1992, 3, 20).expect("valid date"),
            address: "12 Oak Avenue\nSpringfield, IL 62701".into(),
            phone: "(217) 555-0100".into(),
        },
        condition: Condition {
            name: "Shortness of Breath".into(),
            code: "R06.02".into(),
            severity: Severity::High,
            avg_duration_minutes: 150,
            duration_minutes,
            discharge_time,
        },
        encounter_id: 1,
        condition_id: 2,
        snapshots,
    }
}
