//! Condition selection.
//!
//! The candidate pool is the 20-entry base table, extended (never replaced) with pediatric
//! conditions for patients under 18 and geriatric conditions for patients over 65. One
//! condition is chosen uniformly from the pool and its length of stay is the table average
//! scaled by a uniform factor in `[0.5, 2.0)`, truncated to whole minutes.

use crate::constants::{GERIATRIC_AGE_THRESHOLD, PEDIATRIC_AGE_LIMIT};
use chrono::{DateTime, Duration, Utc};
use er_types::{Condition, Severity};
use rand::Rng;

/// Lower bound of the length-of-stay multiplier.
pub const MIN_DURATION_FACTOR: f64 = 0.5;

/// Upper bound of the length-of-stay multiplier.
pub const MAX_DURATION_FACTOR: f64 = 2.0;

/// Static reference record for one condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionTemplate {
    pub name: &'static str,
    /// ICD-10 code.
    pub code: &'static str,
    pub severity: Severity,
    pub avg_duration_minutes: u32,
}

const fn template(
    name: &'static str,
    code: &'static str,
    severity: Severity,
    avg_duration_minutes: u32,
) -> ConditionTemplate {
    ConditionTemplate {
        name,
        code,
        severity,
        avg_duration_minutes,
    }
}

pub static BASE_CONDITIONS: [ConditionTemplate; 20] = [
    template("Chest Pain", "R06.02", Severity::High, 180),
    template("Abdominal Pain", "R10.9", Severity::Medium, 120),
    template("Shortness of Breath", "R06.02", Severity::High, 150),
    template("Fever", "R50.9", Severity::Medium, 90),
    template("Headache", "R51", Severity::Low, 60),
    template("Trauma - Laceration", "S01.9", Severity::Medium, 90),
    template("Fracture", "S72.9", Severity::High, 240),
    template("Asthma Exacerbation", "J45.901", Severity::High, 180),
    template("Hypertension", "I10", Severity::Medium, 120),
    template("Urinary Tract Infection", "N39.0", Severity::Medium, 100),
    template("Pneumonia", "J18.9", Severity::High, 300),
    template("Dehydration", "E86.0", Severity::Medium, 120),
    template("Gastroenteritis", "K52.9", Severity::Medium, 150),
    template("Back Pain", "M54.5", Severity::Low, 90),
    template("Seizure", "R56.9", Severity::High, 200),
    template("Syncope", "R55", Severity::Medium, 120),
    template("Alcohol Intoxication", "F10.129", Severity::Medium, 180),
    template("Drug Overdose", "T50.901A", Severity::High, 240),
    template("Burn", "T30.0", Severity::High, 200),
    template("Anaphylaxis", "T78.2XXA", Severity::High, 150),
];

pub static PEDIATRIC_CONDITIONS: [ConditionTemplate; 2] = [
    template("Pediatric Fever", "R50.9", Severity::Medium, 90),
    template("Croup", "J05.0", Severity::Medium, 120),
];

pub static GERIATRIC_CONDITIONS: [ConditionTemplate; 2] = [
    template("Fall", "W19.XXXA", Severity::High, 180),
    template("Confusion", "R41.82", Severity::Medium, 150),
];

/// Candidate conditions for a patient of `age` whole years.
pub fn candidate_pool(age: u32) -> Vec<&'static ConditionTemplate> {
    let mut pool: Vec<&'static ConditionTemplate> = BASE_CONDITIONS.iter().collect();
    if age < PEDIATRIC_AGE_LIMIT {
        pool.extend(PEDIATRIC_CONDITIONS.iter());
    } else if age > GERIATRIC_AGE_THRESHOLD {
        pool.extend(GERIATRIC_CONDITIONS.iter());
    }
    pool
}

/// Choose a condition for a patient of `age` arriving at `arrival`.
///
/// Draw order: pool index, then duration factor.
pub fn select_condition<R: Rng + ?Sized>(
    rng: &mut R,
    age: u32,
    arrival: DateTime<Utc>,
) -> Condition {
    let pool = candidate_pool(age);
    let chosen = pool[rng.gen_range(0..pool.len())];

    let factor = rng.gen_range(MIN_DURATION_FACTOR..MAX_DURATION_FACTOR);
    let duration_minutes = ((f64::from(chosen.avg_duration_minutes) * factor) as u32).max(1);

    Condition {
        name: chosen.name.to_string(),
        code: chosen.code.to_string(),
        severity: chosen.severity,
        avg_duration_minutes: chosen.avg_duration_minutes,
        duration_minutes,
        discharge_time: arrival + Duration::minutes(i64::from(duration_minutes)),
    }
}

/// Look up a template by condition name across all tables.
#[cfg(test)]
pub(crate) fn find_template(name: &str) -> Option<&'static ConditionTemplate> {
    BASE_CONDITIONS
        .iter()
        .chain(PEDIATRIC_CONDITIONS.iter())
        .chain(GERIATRIC_CONDITIONS.iter())
        .find(|t| t.name == name)
}
